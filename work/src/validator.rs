//! Work validation.

use lattice_crypto::blake2b_64;
use lattice_types::{BlockHash, WorkNonce};

/// Check a work nonce against a root hash and threshold.
///
/// The digest input is the 8 little-endian nonce bytes followed by the
/// 32-byte root; the 8-byte digest is read little-endian and must be at
/// least the threshold.
pub fn validate_work(root: &BlockHash, nonce: WorkNonce, threshold: u64) -> bool {
    let digest = blake2b_64(&[&nonce.to_le_bytes(), root.as_bytes()]);
    u64::from_le_bytes(digest) >= threshold
}
