use std::io;
use thiserror::Error;

/// Failure taxonomy for the client. `Timeout` is special: it is the one condition the
///  ping operation translates into a regular return value (`false`) instead of
///  propagating - everything else reaches the caller verbatim, and nothing is ever
///  retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// caller bug - empty segment lists / buffers never reach the network layer
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// operation on a closed (or never opened) handle
    #[error("endpoint is closed")]
    NotConnected,

    /// no datagram arrived within the configured receive timeout
    #[error("no response within the configured timeout")]
    Timeout,

    /// a response arrived but had the wrong size for its frame type
    #[error("unexpected frame length: expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },

    /// the OS reported fewer bytes sent than requested. UDP sends are atomic, so this
    ///  points to a transport-level fault and is never retried.
    #[error("incomplete datagram send: {sent} of {requested} bytes")]
    PartialSend { requested: usize, sent: usize },

    /// any other network-layer fault
    #[error("network error: {0}")]
    Network(#[source] io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            // SO_RCVTIMEO surfaces as WouldBlock on Unix and TimedOut on Windows
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Error::Timeout,
            _ => Error::Network(e),
        }
    }
}
