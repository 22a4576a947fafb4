//! The node: ties the store, the peer table and the UDP socket together.
//!
//! All state is carried by an explicit [`Node`] value — there are no
//! process-wide globals — so tests can run several nodes in one process.

pub mod config;
pub mod error;
pub mod node;

pub use config::{Config, DEFAULT_UDP_PORT};
pub use error::NodeError;
pub use node::{Node, RunningNode};
