use crate::{error::DecodeError, render::Render, schema::*};
use log::*;
use prost::Message;
use std::{collections::HashMap, io::Write};

/// Decodes a payload under one fixed schema and renders it.
pub type Handler = fn(&[u8], &mut dyn Write) -> Result<(), DecodeError>;

/// What happened to a message that was handled without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Decoded,
    Unrecognized { len: usize },
}

fn decode_and_render<T>(payload: &[u8], out: &mut dyn Write) -> Result<(), DecodeError>
where
    T: Message + Default + Render,
{
    let record = T::decode(payload)?;
    record.render(out)?;
    Ok(())
}

/// Topic to schema dispatch table, built once at startup.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Handler> = HashMap::new();
        handlers.insert("sensor/all", decode_and_render::<SensorData>);
        handlers.insert("sensor/temperature", decode_and_render::<TemperatureData>);
        handlers.insert("sensor/compass", decode_and_render::<CompassData>);
        handlers.insert("sensor/gps", decode_and_render::<GpsPositionData>);
        handlers.insert("sensor/status", decode_and_render::<StatusMessage>);
        Self { handlers }
    }

    /// Renders one message to `out`.
    ///
    /// Topics outside the table are reported with their payload length and
    /// never decoded. A payload that fails to decode is reported to `out` as
    /// well and returned as an error; the dispatcher stays usable either way.
    pub fn handle(
        &self,
        topic: &str,
        payload: &[u8],
        out: &mut dyn Write,
    ) -> Result<Outcome, DecodeError> {
        writeln!(out, "\n--- Message from {} ---", topic)?;

        let handler = match self.handlers.get(topic) {
            Some(handler) => handler,
            None => {
                writeln!(out, "Unknown topic: {}", topic)?;
                writeln!(out, "Payload length: {} bytes", payload.len())?;
                return Ok(Outcome::Unrecognized { len: payload.len() });
            }
        };

        match handler(payload, out) {
            Ok(()) => Ok(Outcome::Decoded),
            Err(DecodeError::Protobuf(e)) => {
                writeln!(out, "Error parsing protobuf message: {}", e)?;
                writeln!(out, "Raw payload length: {} bytes", payload.len())?;
                debug!("Raw payload (base64): {}", base64::encode(payload));
                Err(DecodeError::Protobuf(e))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
