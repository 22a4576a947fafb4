//! Ed25519 signing parameterised over Blake2b-512.
//!
//! The protocol predates SHA-3 standardisation and uses Blake2b-512 in
//! place of SHA-512 throughout the Ed25519 construction: secret-key
//! expansion, the deterministic nonce, and the challenge scalar. The
//! high-level `ed25519-dalek` API hard-codes SHA-512, so key expansion is
//! done by hand and signing goes through the hazmat entry points with
//! `Blake2b512` as the context digest.

use blake2::{Blake2b512, Digest};
use curve25519_dalek::edwards::EdwardsPoint;
use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::VerifyingKey;
use lattice_types::{KeyPair, PrivateKey, PublicKey, Signature};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::hash::blake2b_256_multi;

/// Expand a 32-byte private key into scalar + nonce-prefix form.
fn expand(private: &PrivateKey) -> ExpandedSecretKey {
    let digest = Blake2b512::digest(private.0);
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&digest);
    ExpandedSecretKey::from_bytes(&bytes)
}

fn derive_public(expanded: &ExpandedSecretKey) -> PublicKey {
    let point = EdwardsPoint::mul_base(&expanded.scalar);
    PublicKey(point.compress().to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = derive_public(&expand(&private));
    KeyPair { public, private }
}

/// Derive the key pair at `index` under a 32-byte wallet seed.
///
/// The private key is Blake2b-256(seed || index), index big-endian, the
/// standard scheme wallet software uses to mint successive addresses from
/// one seed.
pub fn keypair_from_seed(seed: &[u8; 32], index: u32) -> KeyPair {
    let private = blake2b_256_multi(&[seed.as_slice(), &index.to_be_bytes()]);
    keypair_from_private(PrivateKey(private))
}

/// Generate a new key pair from the system's secure random source.
pub fn generate_keypair() -> KeyPair {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    keypair_from_private(PrivateKey(bytes))
}

/// Sign a message with a private key.
pub fn sign_message(message: &[u8], private: &PrivateKey) -> Signature {
    let expanded = expand(private);
    let public = derive_public(&expanded);
    let verifying_key = VerifyingKey::from_bytes(public.as_bytes())
        .expect("a point derived by base-scalar multiplication decompresses");
    let signature = raw_sign::<Blake2b512>(&expanded, message, &verifying_key);
    Signature(signature.to_bytes())
}

/// Verify a signature against a message and public key.
pub fn verify_signature(message: &[u8], signature: &Signature, public: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public.as_bytes()) else {
        return false;
    };
    let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    raw_verify::<Blake2b512>(&verifying_key, message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let kp = generate_keypair();
        let sig = sign_message(b"a message", &kp.private);
        assert!(verify_signature(b"a message", &sig, &kp.public));
    }

    #[test]
    fn tampered_message_rejected() {
        let kp = generate_keypair();
        let sig = sign_message(b"a message", &kp.private);
        assert!(!verify_signature(b"another message", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_rejected() {
        let kp = generate_keypair();
        let other = generate_keypair();
        let sig = sign_message(b"a message", &kp.private);
        assert!(!verify_signature(b"a message", &sig, &other.public));
    }

    #[test]
    fn keypair_from_private_is_deterministic() {
        let private = PrivateKey([7u8; 32]);
        let a = keypair_from_private(private.clone());
        let b = keypair_from_private(private);
        assert_eq!(a.public, b.public);
    }

    #[test]
    fn seed_indices_yield_distinct_keys() {
        let seed = [0x11u8; 32];
        let k0 = keypair_from_seed(&seed, 0);
        let k1 = keypair_from_seed(&seed, 1);
        assert_ne!(k0.public, k1.public);
    }
}
