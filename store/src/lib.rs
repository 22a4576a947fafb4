//! Persistent block index and dependency resolver.
//!
//! Blocks arrive from gossip in arbitrary order. The store accepts a block
//! once its proof-of-work and signature check out and its parent is
//! present; otherwise the block is parked in an in-memory orphan pool
//! keyed by the missing parent hash and reconnected the moment the parent
//! lands. Balances are not stored — they are derived by walking the
//! lattice, with memoization.

pub mod block_store;
pub mod error;
pub mod orphans;

pub use block_store::{BlockStore, StoreConfig, StoreOutcome};
pub use error::StoreError;
pub use orphans::OrphanPool;
