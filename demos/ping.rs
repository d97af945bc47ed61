use clap::Parser;
use clap_derive::Parser;
use ledriver::client::Connector;
use ledriver::config::ConnectorConfig;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn, Level};

/// Probe whether an LEDriver peer is reachable.
#[derive(Parser)]
struct Args {
    /// peer address, e.g. 127.0.0.1:9000 or [::1]:9000
    address: String,

    #[clap(long, default_value_t = 1000)]
    timeout_ms: u64,

    #[clap(short, long, default_value_t = false)]
    verbose: bool,
}

pub fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let level = if args.verbose { Level::TRACE } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .ok();

    let peer_addr: SocketAddr = args.address.parse()?;
    let config = ConnectorConfig::new(peer_addr)
        .with_recv_timeout(Duration::from_millis(args.timeout_ms));

    let mut connector = Connector::connect(&config)?;
    if connector.ping()? {
        info!("{} is reachable", peer_addr);
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("{} did not answer within {} ms", peer_addr, args.timeout_ms);
        Ok(ExitCode::FAILURE)
    }
}
