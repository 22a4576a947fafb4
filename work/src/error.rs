//! PoW engine errors.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    /// The full nonce space was searched without a hit. Unreachable for
    /// any realistic threshold, but the search loop is bounded.
    #[error("nonce space exhausted without meeting the threshold")]
    Exhausted,
}
