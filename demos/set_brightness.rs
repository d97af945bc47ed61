use clap::Parser;
use clap_derive::Parser;
use ledriver::client::Connector;
use ledriver::config::ConnectorConfig;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, Level};

/// Send a fire-and-forget brightness update to an LEDriver peer.
#[derive(Parser)]
struct Args {
    /// peer address, e.g. 127.0.0.1:9000 or [::1]:9000
    address: String,

    /// red channel (0-65535)
    r: u16,
    /// green channel (0-65535)
    g: u16,
    /// blue channel (0-65535)
    b: u16,

    #[clap(long, default_value_t = 1000)]
    timeout_ms: u64,

    #[clap(short, long, default_value_t = false)]
    verbose: bool,
}

pub fn main() -> anyhow::Result<()> {
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
    connector.update(args.r, args.g, args.b)?;
    info!("brightness update ({}, {}, {}) sent to {}", args.r, args.g, args.b, peer_addr);

    Ok(())
}
