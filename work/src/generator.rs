//! Nonce search.

use crate::WorkError;
use lattice_crypto::blake2b_64;
use lattice_types::{BlockHash, WorkNonce};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Searches the u64 nonce space for a value meeting the threshold.
///
/// The space is striped across worker threads (thread `i` tries nonces
/// `i, i + n, i + 2n, …`); the first hit stops all workers. Any satisfying
/// nonce is acceptable, so which stripe wins is irrelevant.
pub struct WorkGenerator {
    threads: usize,
}

impl WorkGenerator {
    /// A generator sized to the machine's available parallelism.
    pub fn new() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { threads }
    }

    /// A generator with an explicit worker count (tests use 1).
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Find a nonce for `root` meeting `threshold`.
    pub fn generate(&self, root: &BlockHash, threshold: u64) -> Result<WorkNonce, WorkError> {
        let found = AtomicBool::new(false);
        let result = AtomicU64::new(0);

        std::thread::scope(|scope| {
            for stripe in 0..self.threads {
                let found = &found;
                let result = &result;
                scope.spawn(move || {
                    // The root part of the digest input never changes;
                    // only the leading 8 nonce bytes are rewritten.
                    let mut input = [0u8; 40];
                    input[8..].copy_from_slice(root.as_bytes());

                    let mut nonce = stripe as u64;
                    loop {
                        if found.load(Ordering::Acquire) {
                            return;
                        }
                        input[..8].copy_from_slice(&nonce.to_le_bytes());
                        let digest = blake2b_64(&[&input]);
                        if u64::from_le_bytes(digest) >= threshold {
                            result.store(nonce, Ordering::Relaxed);
                            found.store(true, Ordering::Release);
                            return;
                        }
                        nonce = match nonce.checked_add(self.threads as u64) {
                            Some(next) => next,
                            None => return,
                        };
                    }
                });
            }
        });

        if found.load(Ordering::Acquire) {
            Ok(WorkNonce(result.load(Ordering::Relaxed)))
        } else {
            Err(WorkError::Exhausted)
        }
    }
}

impl Default for WorkGenerator {
    fn default() -> Self {
        Self::new()
    }
}
