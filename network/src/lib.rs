//! Gossip-layer plumbing: the peer table and periodic timers.

pub mod alarm;
pub mod peer;

pub use alarm::Alarm;
pub use peer::{to_v6_mapped, Peer, PeerManager};
