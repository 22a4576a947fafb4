//! Anti-spam proof-of-work.
//!
//! Not mining — a small computational cost attached to every block that
//! makes flooding the network expensive while staying cheap for wallets.
//! A nonce is valid for a root when Blake2b-64(nonce || root), read as a
//! little-endian u64, meets the network threshold.

pub mod error;
pub mod generator;
pub mod thresholds;
pub mod validator;

pub use error::WorkError;
pub use generator::WorkGenerator;
pub use thresholds::{LIVE_THRESHOLD, TEST_THRESHOLD};
pub use validator::validate_work;
