use std::{
    ffi::OsString,
    time::SystemTime,
};
use structopt::clap::{self, ErrorKind};
use structopt::StructOpt;

/// Topic filter covering every topic the simulator publishes on
pub const TOPIC_FILTER: &str = "sensor/#";

/// Port used when the broker port argument is omitted
pub const DEFAULT_PORT: u16 = 1883;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sensor-decoder",
    about = "decodes protobuf sensor messages published over mqtt"
)]
pub struct Opt {
    /// The verbosity of the program
    #[structopt(short, long, default_value = "1")]
    pub verbose: u32,

    /// Client id to present to the broker, generated from the current time if omitted
    #[structopt(long)]
    pub client_id: Option<String>,

    /// The broker host to connect to
    pub broker_host: String,

    /// The broker port to connect to [default: 1883]
    pub broker_port: Option<u16>,
}

impl Opt {
    /// Parses options from an argument list, the first item being the program name.
    pub fn parse_args<I>(args: I) -> Result<Opt, clap::Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString> + Clone,
    {
        Opt::from_iter_safe(args)
    }

    pub fn port(&self) -> u16 {
        self.broker_port.unwrap_or(DEFAULT_PORT)
    }

    pub fn client_id(&self) -> String {
        match &self.client_id {
            Some(id) => id.clone(),
            None => {
                let now = SystemTime::now()
                    .duration_since(SystemTime::UNIX_EPOCH)
                    .map(|d| d.as_millis())
                    .unwrap_or_default();
                format!("{}-{}", "sensor-decoder-rs", now)
            }
        }
    }
}

/// Help and version requests end the process successfully, every other
/// argument error is a startup failure.
pub fn startup_exit_code(err: &clap::Error) -> i32 {
    match err.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_omitted() {
        let opt = Opt::parse_args(&["sensor-decoder", "localhost"]).unwrap();
        assert_eq!(opt.broker_host, "localhost");
        assert_eq!(opt.broker_port, None);
        assert_eq!(opt.port(), DEFAULT_PORT);
        assert_eq!(opt.verbose, 1);
    }

    #[test]
    fn explicit_port_is_used() {
        let opt = Opt::parse_args(&["sensor-decoder", "broker.local", "8883"]).unwrap();
        assert_eq!(opt.broker_host, "broker.local");
        assert_eq!(opt.port(), 8883);
    }

    #[test]
    fn missing_host_is_a_startup_failure() {
        let err = Opt::parse_args(&["sensor-decoder"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredArgument);
        assert_eq!(startup_exit_code(&err), 1);
        assert!(err.message.contains("USAGE"));
    }

    #[test]
    fn malformed_port_fails_fast() {
        let err = Opt::parse_args(&["sensor-decoder", "localhost", "mqtt"]).unwrap_err();
        assert_eq!(startup_exit_code(&err), 1);

        let err = Opt::parse_args(&["sensor-decoder", "localhost", "70000"]).unwrap_err();
        assert_eq!(startup_exit_code(&err), 1);
    }

    #[test]
    fn extra_positionals_are_rejected() {
        let err = Opt::parse_args(&["sensor-decoder", "localhost", "1883", "extra"]).unwrap_err();
        assert_eq!(startup_exit_code(&err), 1);
    }

    #[test]
    fn help_exits_successfully() {
        let err = Opt::parse_args(&["sensor-decoder", "--help"]).unwrap_err();
        assert_eq!(startup_exit_code(&err), 0);
    }

    #[test]
    fn client_id_is_generated_when_absent() {
        let opt = Opt::parse_args(&["sensor-decoder", "localhost"]).unwrap();
        assert!(opt.client_id().starts_with("sensor-decoder-rs-"));

        let opt =
            Opt::parse_args(&["sensor-decoder", "--client-id", "bench-1", "localhost"]).unwrap();
        assert_eq!(opt.client_id(), "bench-1");
    }
}
