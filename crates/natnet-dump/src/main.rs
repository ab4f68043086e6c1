mod config;

use std::io::{self, Write};

use bytes::Bytes;
use config::DumpConfig;
use natnet_proto::{DispatchOutcome, Dispatcher, Packet, PacketStream, Version};
use tracing::{error, info, warn};

const DEFAULT_CONFIG_PATH: &str = "natnet-dump.toml";

#[derive(Debug, Default)]
struct Summary {
    delivered: usize,
    skipped: usize,
    failed: usize,
}

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match DumpConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let data = match std::fs::read(&config.capture.path) {
        Ok(data) => Bytes::from(data),
        Err(e) => {
            error!("Failed to read {}: {e}", config.capture.path.display());
            std::process::exit(1);
        }
    };
    info!(
        "natnet-dump v{}: {} ({} bytes) at protocol {}",
        env!("CARGO_PKG_VERSION"),
        config.capture.path.display(),
        data.len(),
        config.protocol.version
    );

    let dispatcher = Dispatcher::new(config.protocol.version);
    match dump(&dispatcher, data, &config) {
        Ok(summary) => info!(
            "Done: {} delivered, {} skipped, {} failed",
            summary.delivered, summary.skipped, summary.failed
        ),
        Err(e) => {
            error!("Failed to write output: {e}");
            std::process::exit(1);
        }
    }
}

fn dump(dispatcher: &Dispatcher, data: Bytes, config: &DumpConfig) -> io::Result<Summary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut summary = Summary::default();
    let mut stream = PacketStream::new(dispatcher, data);

    for result in stream.by_ref() {
        match result {
            Ok(outcome) => {
                match &outcome {
                    DispatchOutcome::Delivered { packet, .. } => {
                        summary.delivered += 1;
                        if let Packet::ServerInfo(info) = packet {
                            let negotiated = info.negotiate(Version::LATEST);
                            if negotiated != dispatcher.version() {
                                warn!(
                                    "{} advertises protocol {}, capture decoded at {}",
                                    info.application_name,
                                    info.nat_net_protocol_version,
                                    dispatcher.version()
                                );
                            }
                        }
                    }
                    DispatchOutcome::Skipped { .. } => {
                        summary.skipped += 1;
                        if !config.output.skipped {
                            continue;
                        }
                    }
                }
                write_record(&mut out, &outcome, config.output.pretty)?;
            }
            Err(e) => {
                summary.failed += 1;
                warn!("Decode failed: {e}");
            }
        }
    }

    if stream.remaining() > 0 {
        warn!(
            "Stopped at offset {} with {} bytes left",
            stream.position(),
            stream.remaining()
        );
    }
    out.flush()?;
    Ok(summary)
}

fn write_record<W: Write>(out: &mut W, outcome: &DispatchOutcome, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, outcome)?;
    } else {
        serde_json::to_writer(&mut *out, outcome)?;
    }
    writeln!(out)
}
