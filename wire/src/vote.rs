//! Confirm-ack bodies: a vote wrapping a block.

use crate::block::{decode_block, encode_block};
use crate::header::WireBlockType;
use crate::reader::Reader;
use crate::WireError;
use lattice_crypto::{blake2b_256_multi, sign_message, verify_signature};
use lattice_ledger::Block;
use lattice_types::{KeyPair, PublicKey, Signature};

/// A vote for a block: voter account, vote signature, sequence number,
/// then the block body itself.
///
/// The signature does not cover the block bytes directly; it covers
/// Blake2b-256(block_hash || sequence_le), so the same vote stays valid
/// however the block is framed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmAck {
    pub voter: PublicKey,
    pub signature: Signature,
    pub sequence: u64,
    pub block: Block,
}

impl ConfirmAck {
    /// Build and sign a vote for `block`.
    pub fn new(keys: &KeyPair, sequence: u64, block: Block) -> Self {
        let digest = vote_digest(&block, sequence);
        Self {
            voter: keys.public,
            signature: sign_message(&digest, &keys.private),
            sequence,
            block,
        }
    }

    /// Verify the vote signature against the voter's key.
    pub fn verify(&self) -> bool {
        let digest = vote_digest(&self.block, self.sequence);
        verify_signature(&digest, &self.signature, &self.voter)
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.voter.as_bytes());
        out.extend_from_slice(self.signature.as_bytes());
        out.extend_from_slice(&self.sequence.to_le_bytes());
        encode_block(&self.block, out);
    }

    pub(crate) fn decode(
        block_type: WireBlockType,
        r: &mut Reader<'_>,
    ) -> Result<Self, WireError> {
        let voter = PublicKey(r.take()?);
        let signature = Signature(r.take()?);
        let sequence = u64::from_le_bytes(r.take()?);
        let block = decode_block(block_type, r)?;
        Ok(Self {
            voter,
            signature,
            sequence,
            block,
        })
    }
}

fn vote_digest(block: &Block, sequence: u64) -> [u8; 32] {
    blake2b_256_multi(&[block.hash().as_bytes(), &sequence.to_le_bytes()])
}
