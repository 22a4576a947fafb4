//! Proof-of-work nonces.
//!
//! A work value is an 8-byte nonce. Its textual form is the big-endian hex
//! of the u64; the wire form and the hash-input form are the little-endian
//! bytes, i.e. the byte-reverse of the textual form. Both conversions live
//! here so the codec and the PoW engine agree on a single contract.

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-byte proof-of-work nonce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkNonce(pub u64);

impl WorkNonce {
    pub const ZERO: Self = Self(0);

    /// The wire/hash-input byte order.
    pub fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Parse from wire/hash-input byte order.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Parse the 16-character big-endian hex form.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        if s.len() != 16 {
            return Err(TypesError::BadLength {
                expected: 16,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| TypesError::InvalidHex)?;
        Ok(Self(u64::from_be_bytes(bytes)))
    }
}

impl fmt::Display for WorkNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
