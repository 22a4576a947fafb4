//! Fundamental types for the lattice node.
//!
//! This crate defines the primitives shared across every other crate in the
//! workspace: block hashes, Ed25519 key material, 128-bit amounts and
//! proof-of-work nonces, together with their textual (hex) forms.

pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod work;

pub use amount::Amount;
pub use error::TypesError;
pub use hash::BlockHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use work::WorkNonce;
