//! Address codec errors.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Wrong prefix, wrong length, characters outside the alphabet, or
    /// non-zero padding bits.
    #[error("invalid account address format")]
    InvalidFormat,

    /// Well-formed address whose checksum does not match its public key.
    #[error("invalid account address checksum")]
    InvalidChecksum,
}
