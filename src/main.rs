use log::*;
use rumqttc::{Event, EventLoop, Incoming, MqttOptions, Outgoing, QoS, Request, Subscribe};
use sensor_decoder_rs::{
    pause_unless_interrupted, startup_exit_code, ConnectionFailure, Dispatcher, Opt, Outcome,
    SessionState, TOPIC_FILTER,
};
use simple_logger::SimpleLogger;
use std::{io, process, time::Duration};

#[tokio::main]
async fn main() {
    let opt = match Opt::parse_args(std::env::args_os()) {
        Ok(opt) => opt,
        Err(e) => {
            let code = startup_exit_code(&e);
            if code == 0 {
                e.exit();
            }
            eprintln!("{}", e.message);
            process::exit(code);
        }
    };

    match opt.verbose {
        1 => {
            let _e = SimpleLogger::new().with_level(LevelFilter::Info).init();
        }
        2 => {
            let _e = SimpleLogger::new().with_level(LevelFilter::Debug).init();
        }
        3 => {
            let _e = SimpleLogger::new().with_level(LevelFilter::Trace).init();
        }
        0 | _ => {}
    }

    let broker = format!("{}:{}", opt.broker_host, opt.port());
    println!("Connecting to MQTT broker: {}", broker);
    println!("Decoding protobuf messages published under {}", TOPIC_FILTER);
    println!("Press Ctrl+C to stop.");

    let mut mqttoptions = MqttOptions::new(opt.client_id(), &opt.broker_host, opt.port());
    mqttoptions.set_keep_alive(60);
    let mut eventloop = EventLoop::new(mqttoptions, 20 as usize);
    let requests_tx = eventloop.requests_tx.clone();

    let dispatcher = Dispatcher::new();
    let mut state = SessionState::default();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = eventloop.poll() => {
                match res {
                    Ok(Event::Incoming(Incoming::Publish(publish))) => {
                        let payload = &*publish.payload;
                        let mut stdout = io::stdout();
                        match dispatcher.handle(&publish.topic, payload, &mut stdout) {
                            Ok(Outcome::Decoded) => {}
                            Ok(Outcome::Unrecognized { len }) => {
                                debug!("No schema for '{}', skipped {} bytes", publish.topic, len);
                            }
                            Err(e) => {
                                error!(
                                    "Failed to handle message on '{}' ({} bytes): {}",
                                    publish.topic,
                                    payload.len(),
                                    e
                                );
                            }
                        }
                    }
                    Ok(Event::Incoming(Incoming::ConnAck(_connect))) => {
                        if state.connected() {
                            info!("Connected to: {}", broker);
                        } else {
                            info!("Reconnected to: {}", broker);
                        }

                        let subscription = Subscribe::new(TOPIC_FILTER, QoS::AtMostOnce);
                        if let Err(e) = requests_tx.send(Request::Subscribe(subscription)).await {
                            error!("Failed to subscribe to '{}': {:?}", TOPIC_FILTER, e);
                        }
                    }
                    Ok(event) => {
                        trace!("{:?}", event);
                    }
                    Err(e) => match state.classify_error() {
                        ConnectionFailure::Fatal => {
                            error!("Connection to {} failed: {:?}", broker, e);
                            eprintln!("Error: {:?}", e);
                            process::exit(1);
                        }
                        ConnectionFailure::Transient => {
                            warn!("Connection error: {:?}", e);
                            if pause_unless_interrupted(Duration::from_secs(1), &mut shutdown).await {
                                break;
                            }
                        }
                    },
                }
            }
            res = &mut shutdown => {
                if let Err(e) = res {
                    error!("Failed to listen for interrupt: {:?}", e);
                }
                break;
            }
        }
    }

    println!("\nStopping sensor decoder...");

    if state.needs_disconnect() {
        match requests_tx.send(Request::Disconnect).await {
            Ok(()) => {
                let flush = async {
                    loop {
                        match eventloop.poll().await {
                            Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
                            Ok(event) => trace!("{:?}", event),
                            Err(e) => {
                                debug!("Event loop closed during disconnect: {:?}", e);
                                break;
                            }
                        }
                    }
                };
                if tokio::time::timeout(Duration::from_secs(2), flush).await.is_err() {
                    warn!("Timed out sending disconnect to {}", broker);
                }
            }
            Err(e) => {
                error!("Failed to request disconnect from {}: {:?}", broker, e);
            }
        }
    }

    drop(eventloop);
    info!("Disconnected from {}", broker);
}
