//! Wallet: holds an account's key pair and produces its blocks.
//!
//! Proof-of-work is the slow part of block production, so it is generated
//! ahead of time on a worker thread and delivered through a single-slot
//! rendezvous channel; block operations consume the preloaded nonce.

pub mod error;
pub mod wallet;

pub use error::WalletError;
pub use wallet::Wallet;
