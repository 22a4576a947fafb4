//! Errors for parsing textual forms of the primitive types.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid hex encoding")]
    InvalidHex,

    #[error("expected {expected} hex characters, got {actual}")]
    BadLength { expected: usize, actual: usize },
}
