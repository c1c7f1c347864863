//! Human-readable rendering of decoded sensor records.

use crate::schema::*;
use std::{
    fmt,
    io::{self, Write},
};

/// Displays a float the way the simulator's own tooling prints it:
/// positional with at least one fractional digit for 1e-4 <= |x| < 1e16,
/// otherwise exponent form with a signed, two digit minimum exponent
/// (`1e-05`, `1.5e+16`), and `nan`/`inf`/`-inf` for non-finite values.
pub struct Reading(pub f64);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            return f.write_str("nan");
        }
        if x.is_infinite() {
            return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
        }

        let abs = x.abs();
        if abs == 0.0 || (1e-4..1e16).contains(&abs) {
            return write!(f, "{:?}", x);
        }

        let sci = format!("{:e}", x);
        match sci.split_once('e').and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?))) {
            Some((mantissa, exp)) => {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => f.write_str(&sci),
        }
    }
}

/// A decoded record that knows how to print itself.
pub trait Render {
    /// Title line printed above the fields
    const TITLE: &'static str;

    fn render_fields(&self, out: &mut dyn Write) -> io::Result<()>;

    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", Self::TITLE)?;
        self.render_fields(out)
    }
}

impl Render for SensorData {
    const TITLE: &'static str = "Combined Sensor Data:";

    fn render_fields(&self, out: &mut dyn Write) -> io::Result<()> {
        let gps = self.gps.clone().unwrap_or_default();
        writeln!(out, "  CPU Temperature: {}°C", Reading(self.cpu_temperature))?;
        writeln!(out, "  Compass Heading: {}°", Reading(self.compass_heading))?;
        writeln!(out, "  GPS: {}, {}", Reading(gps.latitude), Reading(gps.longitude))?;
        writeln!(out, "  Altitude: {}m", Reading(gps.altitude))?;
        writeln!(out, "  Device ID: {}", self.device_id)?;
        writeln!(out, "  Version: {}", self.version)?;
        writeln!(out, "  Timestamp: {}", self.timestamp)
    }
}

impl Render for TemperatureData {
    const TITLE: &'static str = "Temperature Data:";

    fn render_fields(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "  Temperature: {}°C", Reading(self.temperature))?;
        writeln!(out, "  Unit: {}", self.unit)?;
        writeln!(out, "  Timestamp: {}", self.timestamp)
    }
}

impl Render for CompassData {
    const TITLE: &'static str = "Compass Data:";

    fn render_fields(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "  Heading: {}°", Reading(self.heading))?;
        writeln!(out, "  Unit: {}", self.unit)?;
        writeln!(out, "  Timestamp: {}", self.timestamp)
    }
}

impl Render for GpsPositionData {
    const TITLE: &'static str = "GPS Data:";

    fn render_fields(&self, out: &mut dyn Write) -> io::Result<()> {
        let position = self.position.clone().unwrap_or_default();
        writeln!(out, "  Latitude: {}", Reading(position.latitude))?;
        writeln!(out, "  Longitude: {}", Reading(position.longitude))?;
        writeln!(out, "  Altitude: {}m", Reading(position.altitude))?;
        writeln!(out, "  Accuracy: {}m", Reading(position.accuracy))?;
        writeln!(out, "  Unit: {}", self.unit)?;
        writeln!(out, "  Timestamp: {}", self.timestamp)
    }
}

impl Render for StatusMessage {
    const TITLE: &'static str = "Status Data:";

    fn render_fields(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "  Status: {}", status_label(self.status))?;
        writeln!(out, "  Device ID: {}", self.device_id)?;
        writeln!(out, "  Message: {}", self.message)?;
        writeln!(out, "  Timestamp: {}", self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered<R: Render>(record: &R) -> String {
        let mut out = Vec::new();
        record.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn combined_data_without_gps_uses_zeros() {
        let record = SensorData {
            cpu_temperature: 41.0,
            compass_heading: 180.25,
            gps: None,
            device_id: "imx8mp_sensor".into(),
            version: "1.0".into(),
            timestamp: 1_700_000_000_123,
        };
        let text = rendered(&record);
        assert!(text.starts_with("Combined Sensor Data:\n"));
        assert!(text.contains("  CPU Temperature: 41.0°C\n"));
        assert!(text.contains("  Compass Heading: 180.25°\n"));
        assert!(text.contains("  GPS: 0.0, 0.0\n"));
        assert!(text.contains("  Altitude: 0.0m\n"));
        assert!(text.contains("  Timestamp: 1700000000123\n"));
    }

    #[test]
    fn readings_in_positional_range() {
        assert_eq!(Reading(23.5).to_string(), "23.5");
        assert_eq!(Reading(41.0).to_string(), "41.0");
        assert_eq!(Reading(0.0).to_string(), "0.0");
        assert_eq!(Reading(-0.0).to_string(), "-0.0");
        assert_eq!(Reading(0.0001).to_string(), "0.0001");
        assert_eq!(Reading(-33.8688).to_string(), "-33.8688");
        assert_eq!(Reading(1e15).to_string(), "1000000000000000.0");
    }

    #[test]
    fn readings_in_exponent_range() {
        assert_eq!(Reading(0.00001).to_string(), "1e-05");
        assert_eq!(Reading(-2.5e-7).to_string(), "-2.5e-07");
        assert_eq!(Reading(1e16).to_string(), "1e+16");
        assert_eq!(Reading(1.5e16).to_string(), "1.5e+16");
        assert_eq!(Reading(1e300).to_string(), "1e+300");
        assert_eq!(Reading(5e-324).to_string(), "5e-324");
    }

    #[test]
    fn non_finite_readings() {
        assert_eq!(Reading(f64::NAN).to_string(), "nan");
        assert_eq!(Reading(f64::INFINITY).to_string(), "inf");
        assert_eq!(Reading(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn gps_near_equator_and_sensor_faults() {
        let record = GpsPositionData {
            position: Some(GpsPosition {
                latitude: 0.00001,
                longitude: 1e16,
                altitude: f64::NAN,
                accuracy: f64::INFINITY,
            }),
            unit: "decimal_degrees".into(),
            timestamp: 1,
        };
        let text = rendered(&record);
        assert!(text.contains("  Latitude: 1e-05\n"));
        assert!(text.contains("  Longitude: 1e+16\n"));
        assert!(text.contains("  Altitude: nanm\n"));
        assert!(text.contains("  Accuracy: infm\n"));
    }

    #[test]
    fn status_renders_label_not_number() {
        let record = StatusMessage {
            status: 9,
            device_id: "dev-9".into(),
            message: "?".into(),
            timestamp: 0,
        };
        let text = rendered(&record);
        assert!(text.contains("  Status: UNKNOWN\n"));
        assert!(text.contains("  Device ID: dev-9\n"));
    }
}
