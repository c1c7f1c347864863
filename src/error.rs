use thiserror::Error;

/// Failure while handling a single message. Never fatal to the receive loop.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid protobuf payload: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
