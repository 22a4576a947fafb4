//! The 8-byte datagram header.

use crate::reader::Reader;
use crate::WireError;

/// ASCII `RC`, at offset 0 of every datagram.
pub const MAGIC: [u8; 2] = *b"RC";

pub const VERSION_MAX: u8 = 5;
pub const VERSION_USING: u8 = 5;
pub const VERSION_MIN: u8 = 4;

/// Message type byte (header offset 5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    Invalid = 0,
    NotAType = 1,
    Keepalive = 2,
    Publish = 3,
    ConfirmReq = 4,
    ConfirmAck = 5,
    BulkPull = 6,
    BulkPush = 7,
    FrontierReq = 8,
}

impl MessageType {
    pub fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::Invalid,
            1 => Self::NotAType,
            2 => Self::Keepalive,
            3 => Self::Publish,
            4 => Self::ConfirmReq,
            5 => Self::ConfirmAck,
            6 => Self::BulkPull,
            7 => Self::BulkPush,
            8 => Self::FrontierReq,
            _ => return None,
        })
    }
}

/// Block type byte (header offset 7), selecting the body layout of
/// publish/confirm messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WireBlockType {
    Invalid = 0,
    NotABlock = 1,
    Send = 2,
    Receive = 3,
    Open = 4,
    Change = 5,
}

impl WireBlockType {
    pub fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::Invalid,
            1 => Self::NotABlock,
            2 => Self::Send,
            3 => Self::Receive,
            4 => Self::Open,
            5 => Self::Change,
            _ => return None,
        })
    }
}

/// Decoded header. The version bytes are carried through so a re-encoded
/// message reproduces the datagram it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    pub version_max: u8,
    pub version_using: u8,
    pub version_min: u8,
    pub message_type: MessageType,
    pub extensions: u8,
    pub block_type: WireBlockType,
}

impl MessageHeader {
    /// A header with this node's protocol versions.
    pub fn new(message_type: MessageType, block_type: WireBlockType) -> Self {
        Self {
            version_max: VERSION_MAX,
            version_using: VERSION_USING,
            version_min: VERSION_MIN,
            message_type,
            extensions: 0,
            block_type,
        }
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(self.version_max);
        out.push(self.version_using);
        out.push(self.version_min);
        out.push(self.message_type as u8);
        out.push(self.extensions);
        out.push(self.block_type as u8);
    }

    pub(crate) fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let magic = r.take::<2>()?;
        if magic != MAGIC {
            return Err(WireError::InvalidFraming("bad magic"));
        }
        let version_max = r.byte()?;
        let version_using = r.byte()?;
        let version_min = r.byte()?;
        let message_type = MessageType::from_u8(r.byte()?)
            .ok_or(WireError::InvalidFraming("unknown message type"))?;
        let extensions = r.byte()?;
        let block_type = WireBlockType::from_u8(r.byte()?)
            .ok_or(WireError::InvalidFraming("unknown block type"))?;
        Ok(Self {
            version_max,
            version_using,
            version_min,
            message_type,
            extensions,
            block_type,
        })
    }
}
