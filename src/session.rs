use std::{future::Future, time::Duration};

/// Connection state of the decoder's broker session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Listening,
}

/// How the receive loop should treat an event loop error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFailure {
    /// The broker was never reached, give up
    Fatal,
    /// Lost an established session, keep polling so the client reconnects
    Transient,
}

impl SessionState {
    /// Records a ConnAck. Returns true on the first connection of the process.
    pub fn connected(&mut self) -> bool {
        let first = *self == SessionState::Disconnected;
        *self = SessionState::Listening;
        first
    }

    /// A session the broker accepted has to be closed with DISCONNECT.
    pub fn needs_disconnect(&self) -> bool {
        *self == SessionState::Listening
    }

    pub fn classify_error(&self) -> ConnectionFailure {
        match self {
            SessionState::Disconnected => ConnectionFailure::Fatal,
            SessionState::Listening => ConnectionFailure::Transient,
        }
    }
}

/// Waits `delay` between reconnect attempts unless `interrupt` completes first.
/// Returns true when interrupted.
pub async fn pause_unless_interrupted<F>(delay: Duration, interrupt: &mut F) -> bool
where
    F: Future + Unpin,
{
    tokio::select! {
        _ = tokio::time::sleep(delay) => false,
        _ = interrupt => true,
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Disconnected
    }
}
