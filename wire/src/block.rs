//! Block body codec.
//!
//! Bodies are the variant's distinguishing fields in hash order, followed
//! by the 64-byte signature and the 8-byte work nonce in wire order
//! (little-endian, the reverse of the nonce's textual form).

use crate::header::WireBlockType;
use crate::reader::Reader;
use crate::WireError;
use lattice_ledger::{Block, BlockKind};
use lattice_types::{Amount, BlockHash, PublicKey, Signature, WorkNonce};

/// The header block-type byte for a block.
pub fn wire_block_type(block: &Block) -> WireBlockType {
    match block.kind {
        BlockKind::Open { .. } => WireBlockType::Open,
        BlockKind::Send { .. } => WireBlockType::Send,
        BlockKind::Receive { .. } => WireBlockType::Receive,
        BlockKind::Change { .. } => WireBlockType::Change,
    }
}

pub(crate) fn encode_block(block: &Block, out: &mut Vec<u8>) {
    match &block.kind {
        BlockKind::Open {
            source,
            representative,
            account,
        } => {
            out.extend_from_slice(source.as_bytes());
            out.extend_from_slice(representative.as_bytes());
            out.extend_from_slice(account.as_bytes());
        }
        BlockKind::Send {
            previous,
            destination,
            balance,
        } => {
            out.extend_from_slice(previous.as_bytes());
            out.extend_from_slice(destination.as_bytes());
            out.extend_from_slice(&balance.to_be_bytes());
        }
        BlockKind::Receive { previous, source } => {
            out.extend_from_slice(previous.as_bytes());
            out.extend_from_slice(source.as_bytes());
        }
        BlockKind::Change {
            previous,
            representative,
        } => {
            out.extend_from_slice(previous.as_bytes());
            out.extend_from_slice(representative.as_bytes());
        }
    }
    out.extend_from_slice(block.signature.as_bytes());
    out.extend_from_slice(&block.work.to_le_bytes());
}

pub(crate) fn decode_block(
    block_type: WireBlockType,
    r: &mut Reader<'_>,
) -> Result<Block, WireError> {
    let kind = match block_type {
        WireBlockType::Open => BlockKind::Open {
            source: BlockHash::new(r.take()?),
            representative: PublicKey(r.take()?),
            account: PublicKey(r.take()?),
        },
        WireBlockType::Send => BlockKind::Send {
            previous: BlockHash::new(r.take()?),
            destination: PublicKey(r.take()?),
            balance: Amount::from_be_bytes(r.take()?),
        },
        WireBlockType::Receive => BlockKind::Receive {
            previous: BlockHash::new(r.take()?),
            source: BlockHash::new(r.take()?),
        },
        WireBlockType::Change => BlockKind::Change {
            previous: BlockHash::new(r.take()?),
            representative: PublicKey(r.take()?),
        },
        WireBlockType::Invalid | WireBlockType::NotABlock => {
            return Err(WireError::InvalidFraming("message requires a block body"))
        }
    };
    let signature = Signature(r.take()?);
    let work = WorkNonce::from_le_bytes(r.take()?);
    Ok(Block {
        kind,
        work,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(block: Block) {
        let mut bytes = Vec::new();
        encode_block(&block, &mut bytes);
        let mut r = Reader::new(&bytes);
        let decoded = decode_block(wire_block_type(&block), &mut r).unwrap();
        r.finish().unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn every_variant_round_trips() {
        round_trip(Block::open(
            BlockHash::new([0x01; 32]),
            PublicKey([0x02; 32]),
            PublicKey([0x03; 32]),
            WorkNonce(0x1122334455667788),
            Signature([0x04; 64]),
        ));
        round_trip(Block::send(
            BlockHash::new([0x05; 32]),
            PublicKey([0x06; 32]),
            Amount::new(12345678901234567890),
            WorkNonce(1),
            Signature([0x07; 64]),
        ));
        round_trip(Block::receive(
            BlockHash::new([0x08; 32]),
            BlockHash::new([0x09; 32]),
            WorkNonce(u64::MAX),
            Signature([0x0A; 64]),
        ));
        round_trip(Block::change(
            BlockHash::new([0x0B; 32]),
            PublicKey([0x0C; 32]),
            WorkNonce::ZERO,
            Signature([0x0D; 64]),
        ));
    }

    #[test]
    fn work_bytes_are_reversed_on_the_wire() {
        let block = Block::receive(
            BlockHash::new([0u8; 32]),
            BlockHash::new([0u8; 32]),
            WorkNonce(0x0102030405060708),
            Signature::ZERO,
        );
        let mut bytes = Vec::new();
        encode_block(&block, &mut bytes);
        // Body = 64 fields + 64 signature + 8 work.
        let work_bytes = &bytes[bytes.len() - 8..];
        assert_eq!(work_bytes, [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn truncated_body_rejected() {
        let block = Block::receive(
            BlockHash::new([0x11; 32]),
            BlockHash::new([0x22; 32]),
            WorkNonce(7),
            Signature([0x33; 64]),
        );
        let mut bytes = Vec::new();
        encode_block(&block, &mut bytes);
        bytes.truncate(bytes.len() / 2);
        let mut r = Reader::new(&bytes);
        assert!(decode_block(WireBlockType::Receive, &mut r).is_err());
    }

    #[test]
    fn bodyless_block_types_rejected() {
        let mut r = Reader::new(&[]);
        assert_eq!(
            decode_block(WireBlockType::NotABlock, &mut r),
            Err(WireError::InvalidFraming("message requires a block body"))
        );
    }
}
