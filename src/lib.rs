//! Client side of the LEDriver protocol: a minimal, connectionless binary protocol for
//!  commanding a remote LED driver over UDP (IP V4 or V6).
//!
//! The protocol has exactly two operations:
//! * *PING* - a liveness probe. The driver echoes the request header back verbatim, and
//!    the client treats a missing or foreign reply as "peer not reachable" rather than
//!    as an error.
//! * *UPDATE* - a fire-and-forget brightness command carrying three 16-bit channel
//!    values. The driver never responds, and the client gives no guarantee beyond the
//!    datagram having been handed to the network stack.
//!
//! There is no handshake, no retransmission and no encryption - the only reliability
//!  mechanism is the receive timeout bounding the PING round trip. "Connecting" a
//!  handle means fixing the peer address on the UDP socket for convenience, not
//!  establishing a session.
//!
//! ## Wire format
//!
//! All multi-byte fields are in network byte order (BE):
//! ```ascii
//! 0: magic (u32) - 0x4C454452 ("LEDR")
//! 4: protocol version (u8) - 0x00, the current (unstable/dev) revision
//! 5: action (u8) - 0x00 NONE, 0x01 PING, 0x02 UPDATE
//! 6: flags (u16) - reserved; must be 0 when sending, ignored when receiving
//! 8: R, G, B (u16 each) - present only for UPDATE, no padding
//! ```
//!
//! The header is exactly 8 bytes, an UPDATE frame exactly 14. Frames are never split
//!  across datagrams.
//!
//! ## Usage
//!
//! A [`client::Connector`] owns one UDP socket bound to a single peer for its entire
//!  lifetime. Handles are move-only and single-threaded by design; after [`close`]
//!  (or a move) every operation fails with `NotConnected` and a fresh handle must be
//!  constructed.
//!
//! [`close`]: client::Connector::close

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod wire;

#[cfg(test)]
mod tests {
    use tracing::Level;

    #[ctor::ctor]
    fn init_test_logging() {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(Level::TRACE)
            .try_init()
            .ok();
    }
}
