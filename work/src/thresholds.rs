//! Network-wide work thresholds.
//!
//! A threshold is the minimum value of the 64-bit work digest. Higher
//! thresholds mean harder work; the live value leaves a 2^-34 chance for
//! a random nonce.

/// Threshold on the live network.
pub const LIVE_THRESHOLD: u64 = 0xFFFF_FFC0_0000_0000;

/// Threshold on the test network, low enough that a few hundred hash
/// evaluations find a nonce.
pub const TEST_THRESHOLD: u64 = 0xFF00_0000_0000_0000;
