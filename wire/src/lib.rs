//! Binary codec for the UDP gossip protocol.
//!
//! Every datagram starts with an 8-byte header (magic `RC`, three version
//! bytes, message type, extensions, block type) followed by a fixed-offset
//! body. Nothing is self-describing: offsets, widths and byte orders are
//! protocol constants, including the work nonce travelling in the reverse
//! of its textual byte order.
//!
//! Decoding preserves the header it saw, so `decode(encode(m)) == m` holds
//! byte-exactly even for datagrams from peers on other protocol versions.

pub mod block;
pub mod error;
pub mod header;
pub mod keepalive;
pub mod message;
pub mod vote;

mod reader;

pub use block::wire_block_type;
pub use error::WireError;
pub use header::{MessageHeader, MessageType, WireBlockType};
pub use keepalive::{Keepalive, PEERS_PER_KEEPALIVE};
pub use message::{Message, Payload};
pub use vote::ConfirmAck;
