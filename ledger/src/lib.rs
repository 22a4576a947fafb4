//! Block model for the account lattice.
//!
//! Every account owns a linear chain of blocks anchored by a single Open
//! block. This crate defines the four block variants as one tagged sum,
//! their canonical Blake2b-256 hashing, and the genesis blocks for the
//! live and test networks.

pub mod block;
pub mod genesis;

pub use block::{Block, BlockKind};
pub use genesis::{live_genesis, test_genesis, GENESIS_AMOUNT, TEST_PRIVATE_KEY};
