use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for a [`Connector`](crate::client::Connector).
///
/// The peer address must be fully resolved (numeric address and port) - turning
///  human-readable text into a `SocketAddr` is the front-end's business.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConnectorConfig {
    pub peer_addr: SocketAddr,

    /// How long a ping waits for the echoed header before reporting the peer as
    ///  unreachable. `Duration::ZERO` disables the timeout, blocking indefinitely.
    pub recv_timeout: Duration,
}

impl ConnectorConfig {
    pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_millis(1000);

    pub fn new(peer_addr: SocketAddr) -> ConnectorConfig {
        ConnectorConfig {
            peer_addr,
            recv_timeout: Self::DEFAULT_RECV_TIMEOUT,
        }
    }

    pub fn with_recv_timeout(mut self, recv_timeout: Duration) -> ConnectorConfig {
        self.recv_timeout = recv_timeout;
        self
    }
}
