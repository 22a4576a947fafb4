//! Cryptographic primitives for the lattice node.
//!
//! Blake2b hashing at the digest lengths the protocol uses (256-bit for
//! block hashes, 40-bit for address checksums, 64-bit for proof-of-work),
//! Ed25519 signing parameterised over Blake2b-512 instead of SHA-512, and
//! the base32 account address codec.

pub mod address;
pub mod error;
pub mod hash;
pub mod sign;

pub use address::{decode_account, encode_account, validate_account};
pub use error::AddressError;
pub use hash::{blake2b_256, blake2b_256_multi, blake2b_40, blake2b_64};
pub use sign::{
    generate_keypair, keypair_from_private, keypair_from_seed, sign_message, verify_signature,
};
