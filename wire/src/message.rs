//! Top-level messages: header + body.

use crate::block::{decode_block, encode_block, wire_block_type};
use crate::header::{MessageHeader, MessageType, WireBlockType};
use crate::keepalive::Keepalive;
use crate::reader::Reader;
use crate::vote::ConfirmAck;
use crate::WireError;
use lattice_ledger::Block;
use std::net::SocketAddrV6;

/// Message bodies this node speaks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Keepalive(Keepalive),
    Publish(Block),
    ConfirmReq(Block),
    ConfirmAck(ConfirmAck),
}

/// A framed message. Constructors stamp this node's versions; decoded
/// messages keep the header they arrived with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub payload: Payload,
}

impl Message {
    pub fn keepalive(peers: &[SocketAddrV6]) -> Self {
        Self {
            header: MessageHeader::new(MessageType::Keepalive, WireBlockType::Invalid),
            payload: Payload::Keepalive(Keepalive::new(peers)),
        }
    }

    pub fn publish(block: Block) -> Self {
        Self {
            header: MessageHeader::new(MessageType::Publish, wire_block_type(&block)),
            payload: Payload::Publish(block),
        }
    }

    pub fn confirm_req(block: Block) -> Self {
        Self {
            header: MessageHeader::new(MessageType::ConfirmReq, wire_block_type(&block)),
            payload: Payload::ConfirmReq(block),
        }
    }

    pub fn confirm_ack(ack: ConfirmAck) -> Self {
        Self {
            header: MessageHeader::new(MessageType::ConfirmAck, wire_block_type(&ack.block)),
            payload: Payload::ConfirmAck(ack),
        }
    }

    /// Serialize for transmission. Encoding into memory cannot fail.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(512);
        self.header.encode(&mut out);
        match &self.payload {
            Payload::Keepalive(keepalive) => keepalive.encode(&mut out),
            Payload::Publish(block) | Payload::ConfirmReq(block) => {
                encode_block(block, &mut out)
            }
            Payload::ConfirmAck(ack) => ack.encode(&mut out),
        }
        out
    }

    /// Parse one datagram. The entire buffer must be consumed.
    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let mut r = Reader::new(buf);
        let header = MessageHeader::decode(&mut r)?;
        let payload = match header.message_type {
            MessageType::Keepalive => Payload::Keepalive(Keepalive::decode(&mut r)?),
            MessageType::Publish => Payload::Publish(decode_block(header.block_type, &mut r)?),
            MessageType::ConfirmReq => {
                Payload::ConfirmReq(decode_block(header.block_type, &mut r)?)
            }
            MessageType::ConfirmAck => {
                Payload::ConfirmAck(ConfirmAck::decode(header.block_type, &mut r)?)
            }
            other => return Err(WireError::Unsupported(other)),
        };
        r.finish()?;
        Ok(Self { header, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_crypto::generate_keypair;
    use lattice_types::{Amount, BlockHash, PublicKey, Signature, WorkNonce};
    use std::net::Ipv6Addr;

    /// A publish-open datagram captured from the reference network. Note
    /// the header: the sender advertised versions 4/5/1.
    const CAPTURED_PUBLISH_OPEN: &str = "5243040501030004\
        FBC1F34CF9EF42FB137A909873BD3FDEC047CB8A6D4448B43C0610931E268F01\
        2298FAB7C61058E77EA554CB93EDEEDA0692CBFCC540AB213B2836B29029E23A\
        0A3E8B35979AC58F7A0AB42656B28294F5968EB059749EA36BC372DDCDFDBB01\
        34086DB608D63F4A086FD92E0BB4AC6A05926CEC84E4D7D99A86F81D90EA9669\
        A9E02B4E907D5E09491206D76E4787F6F2C26B8FD9932315B10EC005A8B4F60D\
        DA9D288B1C14A4CB";

    fn sample_send() -> Block {
        Block::send(
            BlockHash::new([0x31; 32]),
            PublicKey([0x32; 32]),
            Amount::new(1_000_000_000),
            WorkNonce(0x1234_5678_9ABC_DEF0),
            Signature([0x33; 64]),
        )
    }

    fn assert_round_trip(message: Message) {
        let bytes = message.encode();
        let decoded = Message::decode(&bytes).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn captured_datagram_round_trips() {
        let bytes = hex::decode(CAPTURED_PUBLISH_OPEN).unwrap();
        assert_eq!(bytes.len(), 176);

        let message = Message::decode(&bytes).unwrap();
        assert_eq!(message.header.version_max, 4);
        assert_eq!(message.header.version_using, 5);
        assert_eq!(message.header.version_min, 1);
        assert_eq!(message.header.message_type, MessageType::Publish);
        assert_eq!(message.header.block_type, WireBlockType::Open);

        let Payload::Publish(block) = &message.payload else {
            panic!("expected a publish payload");
        };
        assert_eq!(
            block.previous().to_string(),
            "FBC1F34CF9EF42FB137A909873BD3FDEC047CB8A6D4448B43C0610931E268F01"
        );
        // The wire carries the work byte-reversed relative to its hex form.
        assert_eq!(block.work.to_string(), "cba4141c8b289dda");

        assert_eq!(message.encode(), bytes);
    }

    #[test]
    fn keepalive_round_trips() {
        let peers = [
            SocketAddrV6::new(Ipv6Addr::new(0, 0, 0, 0, 0, 0xFFFF, 0xC0A8, 1), 7075, 0, 0),
            SocketAddrV6::new(Ipv6Addr::LOCALHOST, 54000, 0, 0),
        ];
        assert_round_trip(Message::keepalive(&peers));
    }

    #[test]
    fn publish_round_trips_for_every_variant() {
        assert_round_trip(Message::publish(sample_send()));
        assert_round_trip(Message::publish(Block::open(
            BlockHash::new([0x41; 32]),
            PublicKey([0x42; 32]),
            PublicKey([0x43; 32]),
            WorkNonce(7),
            Signature([0x44; 64]),
        )));
        assert_round_trip(Message::publish(Block::receive(
            BlockHash::new([0x45; 32]),
            BlockHash::new([0x46; 32]),
            WorkNonce(8),
            Signature([0x47; 64]),
        )));
        assert_round_trip(Message::publish(Block::change(
            BlockHash::new([0x48; 32]),
            PublicKey([0x49; 32]),
            WorkNonce(9),
            Signature([0x4A; 64]),
        )));
    }

    #[test]
    fn confirm_req_round_trips() {
        assert_round_trip(Message::confirm_req(sample_send()));
    }

    #[test]
    fn confirm_ack_round_trips() {
        let keys = generate_keypair();
        let ack = ConfirmAck::new(&keys, 3, sample_send());
        assert_round_trip(Message::confirm_ack(ack));
    }

    #[test]
    fn header_block_type_matches_payload() {
        let message = Message::publish(sample_send());
        assert_eq!(message.header.block_type, WireBlockType::Send);
    }

    #[test]
    fn empty_datagram_rejected() {
        assert_eq!(
            Message::decode(&[]),
            Err(WireError::InvalidFraming("truncated message"))
        );
    }

    #[test]
    fn corrupt_magic_rejected() {
        let mut bytes = Message::publish(sample_send()).encode();
        bytes[0] = 0xFF;
        assert_eq!(
            Message::decode(&bytes),
            Err(WireError::InvalidFraming("bad magic"))
        );
    }

    #[test]
    fn truncated_datagram_rejected() {
        let bytes = Message::publish(sample_send()).encode();
        assert!(Message::decode(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = Message::publish(sample_send()).encode();
        bytes.push(0);
        assert_eq!(
            Message::decode(&bytes),
            Err(WireError::InvalidFraming("trailing bytes"))
        );
    }

    #[test]
    fn mismatched_block_type_rejected() {
        // A publish framed as a receive but carrying a send-sized body.
        let mut bytes = Message::publish(sample_send()).encode();
        bytes[7] = WireBlockType::Receive as u8;
        assert!(Message::decode(&bytes).is_err());
    }

    #[test]
    fn unsupported_message_types_reported() {
        let mut bytes = Message::keepalive(&[]).encode();
        bytes[5] = MessageType::FrontierReq as u8;
        assert_eq!(
            Message::decode(&bytes),
            Err(WireError::Unsupported(MessageType::FrontierReq))
        );
    }

    #[test]
    fn publish_without_block_body_rejected() {
        let mut bytes = Message::publish(sample_send()).encode();
        bytes[7] = WireBlockType::NotABlock as u8;
        assert_eq!(
            Message::decode(&bytes),
            Err(WireError::InvalidFraming("message requires a block body"))
        );
    }
}
