//! The four block variants and their canonical hashing.

use lattice_crypto::{blake2b_256_multi, sign_message, verify_signature};
use lattice_types::{Amount, BlockHash, PrivateKey, PublicKey, Signature, WorkNonce};
use lattice_work::validate_work;
use serde::{Deserialize, Serialize};

/// The variant-specific fields of a block.
///
/// The canonical block hash covers exactly these fields, in declaration
/// order, as raw binary (hashes and public keys as 32 bytes, balances as
/// 16 big-endian bytes). Work and signature are never hashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// First block of an account. `source` is the Send being claimed;
    /// for the genesis account it is the account's own public key.
    Open {
        source: BlockHash,
        representative: PublicKey,
        account: PublicKey,
    },
    /// Debits this account. `balance` is the balance *after* the send.
    Send {
        previous: BlockHash,
        destination: PublicKey,
        balance: Amount,
    },
    /// Credits this account with the amount of the Send at `source`.
    Receive {
        previous: BlockHash,
        source: BlockHash,
    },
    /// Re-delegates voting weight without moving balance.
    Change {
        previous: BlockHash,
        representative: PublicKey,
    },
}

/// A block: variant fields plus the proof-of-work nonce and signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub work: WorkNonce,
    pub signature: Signature,
}

impl Block {
    pub fn open(
        source: BlockHash,
        representative: PublicKey,
        account: PublicKey,
        work: WorkNonce,
        signature: Signature,
    ) -> Self {
        Self {
            kind: BlockKind::Open {
                source,
                representative,
                account,
            },
            work,
            signature,
        }
    }

    pub fn send(
        previous: BlockHash,
        destination: PublicKey,
        balance: Amount,
        work: WorkNonce,
        signature: Signature,
    ) -> Self {
        Self {
            kind: BlockKind::Send {
                previous,
                destination,
                balance,
            },
            work,
            signature,
        }
    }

    pub fn receive(
        previous: BlockHash,
        source: BlockHash,
        work: WorkNonce,
        signature: Signature,
    ) -> Self {
        Self {
            kind: BlockKind::Receive { previous, source },
            work,
            signature,
        }
    }

    pub fn change(
        previous: BlockHash,
        representative: PublicKey,
        work: WorkNonce,
        signature: Signature,
    ) -> Self {
        Self {
            kind: BlockKind::Change {
                previous,
                representative,
            },
            work,
            signature,
        }
    }

    /// The canonical Blake2b-256 hash over the variant's fields.
    pub fn hash(&self) -> BlockHash {
        let digest = match &self.kind {
            BlockKind::Open {
                source,
                representative,
                account,
            } => blake2b_256_multi(&[
                source.as_bytes(),
                representative.as_bytes(),
                account.as_bytes(),
            ]),
            BlockKind::Send {
                previous,
                destination,
                balance,
            } => {
                let balance_bytes = balance.to_be_bytes();
                blake2b_256_multi(&[previous.as_bytes(), destination.as_bytes(), &balance_bytes])
            }
            BlockKind::Receive { previous, source } => {
                blake2b_256_multi(&[previous.as_bytes(), source.as_bytes()])
            }
            BlockKind::Change {
                previous,
                representative,
            } => blake2b_256_multi(&[previous.as_bytes(), representative.as_bytes()]),
        };
        BlockHash::new(digest)
    }

    /// The proof-of-work input: the account's public key for Open blocks
    /// (there is no predecessor to bind to at account creation), the
    /// previous hash for everything else.
    pub fn root(&self) -> BlockHash {
        match &self.kind {
            BlockKind::Open { account, .. } => BlockHash::new(*account.as_bytes()),
            BlockKind::Send { previous, .. }
            | BlockKind::Receive { previous, .. }
            | BlockKind::Change { previous, .. } => *previous,
        }
    }

    /// The dependency pointer: the block that must be stored before this
    /// one. For Open blocks that is the claimed Send (`source`).
    pub fn previous(&self) -> BlockHash {
        match &self.kind {
            BlockKind::Open { source, .. } => *source,
            BlockKind::Send { previous, .. }
            | BlockKind::Receive { previous, .. }
            | BlockKind::Change { previous, .. } => *previous,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.kind, BlockKind::Open { .. })
    }

    /// Lowercase variant name, for logging.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            BlockKind::Open { .. } => "open",
            BlockKind::Send { .. } => "send",
            BlockKind::Receive { .. } => "receive",
            BlockKind::Change { .. } => "change",
        }
    }

    /// Sign the block hash with the owning account's private key.
    pub fn sign(&mut self, private: &PrivateKey) {
        self.signature = sign_message(self.hash().as_bytes(), private);
    }

    /// Verify the signature against the owning account's public key.
    pub fn verify_signature(&self, account: &PublicKey) -> bool {
        verify_signature(self.hash().as_bytes(), &self.signature, account)
    }

    /// Verify the proof-of-work nonce against the block's root hash.
    pub fn verify_work(&self, threshold: u64) -> bool {
        validate_work(&self.root(), self.work, threshold)
    }
}
