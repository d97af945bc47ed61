use std::io::{IoSlice, Read};
use std::net::SocketAddr;
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, trace};

use crate::error::Error;

/// Abstraction for the mechanics of moving datagrams to and from one fixed peer,
///  introduced to facilitate swapping the I/O part out for testing.
///
/// All methods assume single-threaded, sequential use - there is no internal locking.
pub trait DatagramSocket {
    /// Gather-send: transmit the segments, concatenated in order, as a single datagram.
    fn send_segments(&mut self, segments: &[&[u8]]) -> Result<(), Error>;

    /// Block until a datagram arrives, the configured timeout elapses (`Timeout`) or a
    ///  network fault occurs. Returns the true datagram length, which may be smaller
    ///  than the buffer; the remainder of the buffer is left untouched.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Error>;

    /// whether the handle currently owns a live socket
    fn is_open(&self) -> bool;

    /// Idempotent; after closing, the handle is permanently invalid and every other
    ///  operation fails with `NotConnected`.
    fn close(&mut self);
}

/// A UDP socket bound to a single fixed peer for its entire lifetime.
///
/// The handle is move-only: ownership transfers invalidate the source binding at
///  compile time, which makes a moved-from handle indistinguishable from a closed one.
///  Dropping the handle releases the descriptor.
pub struct UdpTransport {
    socket: Option<Socket>,
}

impl UdpTransport {
    /// Opens a datagram socket of the peer's address family, fixes the peer as the
    ///  default destination and configures the receive timeout (`Duration::ZERO` for
    ///  no timeout). Partially created resources are released if any step fails.
    pub fn connect(peer_addr: SocketAddr, recv_timeout: Duration) -> Result<UdpTransport, Error> {
        let socket = Socket::new(Domain::for_address(peer_addr), Type::DGRAM, Some(Protocol::UDP))?;
        socket.connect(&SockAddr::from(peer_addr))?;

        let timeout = if recv_timeout.is_zero() { None } else { Some(recv_timeout) };
        socket.set_read_timeout(timeout)?;

        debug!("opened datagram endpoint for peer {:?}, receive timeout {:?}", peer_addr, timeout);
        Ok(UdpTransport { socket: Some(socket) })
    }
}

impl DatagramSocket for UdpTransport {
    fn send_segments(&mut self, segments: &[&[u8]]) -> Result<(), Error> {
        let socket = self.socket.as_ref().ok_or(Error::NotConnected)?;

        if segments.is_empty() {
            return Err(Error::InvalidArgument("empty segment list"));
        }
        let requested: usize = segments.iter().map(|s| s.len()).sum();
        if requested == 0 {
            return Err(Error::InvalidArgument("zero bytes to send"));
        }

        let io_slices: Vec<IoSlice> = segments.iter().map(|s| IoSlice::new(s)).collect();

        trace!("sending {} bytes in {} segments", requested, segments.len());
        let sent = socket.send_vectored(&io_slices)?;
        if sent != requested {
            return Err(Error::PartialSend { requested, sent });
        }
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let mut socket = self.socket.as_ref().ok_or(Error::NotConnected)?;

        if buf.is_empty() {
            return Err(Error::InvalidArgument("empty receive buffer"));
        }

        let received = socket.read(buf)?;
        trace!("received {} bytes", received);
        Ok(received)
    }

    fn is_open(&self) -> bool {
        self.socket.is_some()
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            debug!("closed datagram endpoint");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::UdpSocket;
    use std::time::Instant;

    fn bound_peer() -> (UdpSocket, SocketAddr) {
        let peer = UdpSocket::bind("127.0.0.1:0").unwrap();
        peer.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        let addr = peer.local_addr().unwrap();
        (peer, addr)
    }

    #[test]
    fn test_gather_send_concatenates_segments() {
        let (peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(200)).unwrap();

        transport.send_segments(&[b"abc", b"defg"]).unwrap();

        let mut buf = [0u8; 32];
        let (n, _) = peer.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"abcdefg");
    }

    #[test]
    fn test_send_empty_segment_list_is_invalid() {
        let (_peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(200)).unwrap();

        assert!(matches!(transport.send_segments(&[]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_send_zero_total_bytes_is_invalid() {
        let (_peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(200)).unwrap();

        assert!(matches!(
            transport.send_segments(&[b"", b""]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_receive_reports_true_datagram_length() {
        let (peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(500)).unwrap();

        transport.send_segments(&[b"x"]).unwrap();
        let mut peer_buf = [0u8; 8];
        let (_, client_addr) = peer.recv_from(&mut peer_buf).unwrap();
        peer.send_to(b"abc", client_addr).unwrap();

        let mut buf = [0xAAu8; 16];
        let received = transport.receive(&mut buf).unwrap();
        assert_eq!(received, 3);
        assert_eq!(&buf[..3], b"abc");
        // remainder is unspecified but must not have been overrun
        assert_eq!(&buf[8..], &[0xAA; 8]);
    }

    #[test]
    fn test_receive_empty_buffer_is_invalid() {
        let (_peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(200)).unwrap();

        let mut buf = [0u8; 0];
        assert!(matches!(transport.receive(&mut buf), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_receive_times_out_against_silent_peer() {
        let (_peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(150)).unwrap();

        let start = Instant::now();
        let mut buf = [0u8; 8];
        let result = transport.receive(&mut buf);
        let elapsed = start.elapsed();

        assert!(matches!(result, Err(Error::Timeout)));
        assert!(elapsed >= Duration::from_millis(100), "returned too early: {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(1), "returned too late: {:?}", elapsed);
    }

    #[test]
    fn test_closed_handle_rejects_every_operation() {
        let (_peer, addr) = bound_peer();
        let mut transport = UdpTransport::connect(addr, Duration::from_millis(200)).unwrap();

        assert!(transport.is_open());
        transport.close();
        assert!(!transport.is_open());
        // idempotent
        transport.close();

        assert!(matches!(transport.send_segments(&[b"abc"]), Err(Error::NotConnected)));
        let mut buf = [0u8; 8];
        assert!(matches!(transport.receive(&mut buf), Err(Error::NotConnected)));
    }

    #[test]
    fn test_connect_with_zero_timeout_blocks_indefinitely() {
        let (_peer, addr) = bound_peer();
        let transport = UdpTransport::connect(addr, Duration::ZERO).unwrap();
        assert!(transport.is_open());
    }
}
