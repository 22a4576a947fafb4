//! Store errors.

use lattice_types::BlockHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("proof-of-work below threshold for block {0}")]
    InvalidWork(BlockHash),

    #[error("invalid signature on block {0}")]
    InvalidSignature(BlockHash),

    #[error("referenced source {0} is not a stored send block")]
    UnknownSource(BlockHash),

    /// A correct chain cannot contain a cycle; a corrupt or hostile store
    /// might, and balance derivation must still terminate.
    #[error("cycle detected while walking ancestors of {0}")]
    ChainCycle(BlockHash),

    #[error("store is corrupt: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] heed::Error),

    #[error("serialization error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
