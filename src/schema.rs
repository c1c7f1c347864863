//! Protobuf records published by the sensor simulator.
//!
//! These mirror `proto/sensor.proto` tag for tag. Each record is decoded fresh
//! from a single message payload and dropped once rendered.

use std::convert::TryFrom;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GpsPosition {
    #[prost(double, tag = "1")]
    pub latitude: f64,
    #[prost(double, tag = "2")]
    pub longitude: f64,
    #[prost(double, tag = "3")]
    pub altitude: f64,
    #[prost(double, tag = "4")]
    pub accuracy: f64,
}

/// All readings combined, published on `sensor/all`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SensorData {
    #[prost(double, tag = "1")]
    pub cpu_temperature: f64,
    #[prost(double, tag = "2")]
    pub compass_heading: f64,
    #[prost(message, optional, tag = "3")]
    pub gps: Option<GpsPosition>,
    #[prost(string, tag = "4")]
    pub device_id: String,
    #[prost(string, tag = "5")]
    pub version: String,
    #[prost(int64, tag = "6")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemperatureData {
    #[prost(double, tag = "1")]
    pub temperature: f64,
    #[prost(string, tag = "2")]
    pub unit: String,
    #[prost(int64, tag = "3")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompassData {
    #[prost(double, tag = "1")]
    pub heading: f64,
    #[prost(string, tag = "2")]
    pub unit: String,
    #[prost(int64, tag = "3")]
    pub timestamp: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GpsPositionData {
    #[prost(message, optional, tag = "1")]
    pub position: Option<GpsPosition>,
    #[prost(string, tag = "2")]
    pub unit: String,
    #[prost(int64, tag = "3")]
    pub timestamp: i64,
}

/// Device status, published retained on `sensor/status`.
///
/// `status` holds the raw wire value so that unknown values survive decoding;
/// use [`status_label`] to display it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StatusMessage {
    #[prost(enumeration = "Status", tag = "1")]
    pub status: i32,
    #[prost(string, tag = "2")]
    pub device_id: String,
    #[prost(string, tag = "3")]
    pub message: String,
    #[prost(int64, tag = "4")]
    pub timestamp: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Status {
    Unknown = 0,
    Online = 1,
    Offline = 2,
    Error = 3,
}

const STATUS_LABELS: [&str; 4] = ["UNKNOWN", "ONLINE", "OFFLINE", "ERROR"];

/// Label for a raw status value, `UNKNOWN` for anything outside 0..=3.
pub fn status_label(status: i32) -> &'static str {
    usize::try_from(status)
        .ok()
        .and_then(|i| STATUS_LABELS.get(i))
        .copied()
        .unwrap_or(STATUS_LABELS[0])
}
