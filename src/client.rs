use bytes::BytesMut;
use tracing::{debug, trace};

use crate::config::ConnectorConfig;
use crate::error::Error;
use crate::transport::{DatagramSocket, UdpTransport};
use crate::wire::{Action, BrightnessCommand, WireHeader};

/// Client handle for one LED driver. Owns the underlying socket exclusively; move-only
///  and intended for single-threaded, sequential use.
pub struct Connector<S: DatagramSocket = UdpTransport> {
    socket: S,
}

impl Connector<UdpTransport> {
    pub fn connect(config: &ConnectorConfig) -> Result<Connector<UdpTransport>, Error> {
        let socket = UdpTransport::connect(config.peer_addr, config.recv_timeout)?;
        Ok(Connector { socket })
    }
}

impl<S: DatagramSocket> Connector<S> {
    /// Wraps an already opened socket. This is the seam for scripted sockets in tests.
    pub fn with_socket(socket: S) -> Connector<S> {
        Connector { socket }
    }

    /// Liveness probe: sends a PING header and waits (bounded by the receive timeout)
    ///  for the driver to echo it back verbatim.
    ///
    /// Returns `Ok(false)` both when the timeout elapses and when the echoed header
    ///  differs from the request in any field - neither is a transport fault, they mean
    ///  "no recognizable LEDriver peer behind this address". A response of any size
    ///  other than 8 bytes is a hard `UnexpectedLength` error, and every other
    ///  transport fault propagates unchanged.
    pub fn ping(&mut self) -> Result<bool, Error> {
        if !self.socket.is_open() {
            return Err(Error::NotConnected);
        }

        let request = WireHeader::for_action(Action::Ping);
        let mut send_buf = BytesMut::with_capacity(WireHeader::SERIALIZED_LEN);
        request.ser(&mut send_buf);

        self.socket.send_segments(&[&send_buf[..]])?;

        let mut response = [0u8; WireHeader::SERIALIZED_LEN];
        let received = match self.socket.receive(&mut response) {
            Ok(n) => n,
            Err(Error::Timeout) => {
                debug!("no ping response within the timeout window");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if received != WireHeader::SERIALIZED_LEN {
            return Err(Error::UnexpectedLength {
                expected: WireHeader::SERIALIZED_LEN,
                actual: received,
            });
        }

        let echoed = WireHeader::deser(&mut &response[..])?;
        trace!("ping response: {:?}", echoed);
        Ok(echoed == request)
    }

    /// Fire-and-forget brightness command. Header and payload go out as two segments of
    ///  a single gather-send; no acknowledgement exists in the protocol, so success
    ///  only means the datagram was handed to the network stack.
    pub fn update(&mut self, r: u16, g: u16, b: u16) -> Result<(), Error> {
        if !self.socket.is_open() {
            return Err(Error::NotConnected);
        }

        let mut header_buf = BytesMut::with_capacity(WireHeader::SERIALIZED_LEN);
        WireHeader::for_action(Action::Update).ser(&mut header_buf);

        let mut payload_buf = BytesMut::with_capacity(BrightnessCommand::SERIALIZED_LEN);
        BrightnessCommand { r, g, b }.ser(&mut payload_buf);

        trace!("sending brightness update ({}, {}, {})", r, g, b);
        self.socket.send_segments(&[&header_buf[..], &payload_buf[..]])
    }

    pub fn is_open(&self) -> bool {
        self.socket.is_open()
    }

    /// Idempotent. Afterwards the handle is permanently invalid; construct a new one to
    ///  talk to the peer again.
    pub fn close(&mut self) {
        self.socket.close();
    }
}
