//! Wallet errors.

use lattice_store::StoreError;
use lattice_types::{Amount, BlockHash};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no pre-generated work available")]
    NoWork,

    #[error("account already has an open block")]
    AlreadyOpen,

    #[error("operation requires an opened account")]
    EmptyAccount,

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Amount,
        available: Amount,
    },

    #[error("source {0} is not a stored send to this account")]
    UnknownSource(BlockHash),

    #[error("a work generation task is already outstanding")]
    DuplicateWorkTask,

    /// The preloaded nonce no longer covers the chain head it would be
    /// attached to.
    #[error("pre-generated work does not cover the current head")]
    StaleWork,

    #[error(transparent)]
    Store(#[from] StoreError),
}
