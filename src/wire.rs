use bytes::{Buf, BufMut, BytesMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::Error;

/// Opcodes of the protocol. The driver must not respond to `None`, echoes the header
///  for `Ping` and silently applies `Update`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Action {
    None = 0x00,
    Ping = 0x01,
    Update = 0x02,
}

/// The fixed 8-byte header starting every frame. Constructed fresh per operation and
///  never mutated once handed to the transport.
///
/// `action` is kept as a raw `u8` on purpose: decoding performs no opcode validation,
///  an unknown value simply decodes to its numeric form and interpreting it is the
///  caller's business.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WireHeader {
    pub magic: u32,
    pub version: u8,
    pub action: u8,
    /// reserved; must be 0 when sending, ignored when receiving
    pub flags: u16,
}

impl WireHeader {
    /// "LEDR"
    pub const MAGIC: u32 = 0x4C45_4452;
    /// unstable/dev revision
    pub const PROTOCOL_VERSION: u8 = 0x00;
    pub const SERIALIZED_LEN: usize = 8;

    pub fn for_action(action: Action) -> WireHeader {
        WireHeader {
            magic: Self::MAGIC,
            version: Self::PROTOCOL_VERSION,
            action: action.into(),
            flags: 0,
        }
    }

    pub fn ser(&self, buf: &mut BytesMut) {
        buf.put_u32(self.magic);
        buf.put_u8(self.version);
        buf.put_u8(self.action);
        buf.put_u16(self.flags);
    }

    pub fn deser(buf: &mut impl Buf) -> Result<WireHeader, Error> {
        if buf.remaining() < Self::SERIALIZED_LEN {
            return Err(Error::UnexpectedLength {
                expected: Self::SERIALIZED_LEN,
                actual: buf.remaining(),
            });
        }
        Ok(WireHeader {
            magic: buf.get_u32(),
            version: buf.get_u8(),
            action: buf.get_u8(),
            flags: buf.get_u16(),
        })
    }
}

/// UPDATE payload: three channel values, transmitted R, G, B with no padding.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BrightnessCommand {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl BrightnessCommand {
    pub const SERIALIZED_LEN: usize = 3 * size_of::<u16>();

    pub fn ser(&self, buf: &mut BytesMut) {
        buf.put_u16(self.r);
        buf.put_u16(self.g);
        buf.put_u16(self.b);
    }

    pub fn deser(buf: &mut impl Buf) -> Result<BrightnessCommand, Error> {
        if buf.remaining() < Self::SERIALIZED_LEN {
            return Err(Error::UnexpectedLength {
                expected: Self::SERIALIZED_LEN,
                actual: buf.remaining(),
            });
        }
        Ok(BrightnessCommand {
            r: buf.get_u16(),
            g: buf.get_u16(),
            b: buf.get_u16(),
        })
    }
}

/// header plus payload, the full size of an UPDATE datagram
pub const UPDATE_FRAME_LEN: usize = WireHeader::SERIALIZED_LEN + BrightnessCommand::SERIALIZED_LEN;
