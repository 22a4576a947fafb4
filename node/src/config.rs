//! Node configuration.
//!
//! A plain value, built in code: the daemon translates CLI flags into it
//! and tests construct it directly. There is no config-file layer.

use lattice_ledger::{live_genesis, test_genesis, Block};
use lattice_wire::PEERS_PER_KEEPALIVE;
use lattice_work::{LIVE_THRESHOLD, TEST_THRESHOLD};
use std::net::SocketAddrV6;
use std::path::PathBuf;
use std::time::Duration;

/// The protocol's UDP port, both directions.
pub const DEFAULT_UDP_PORT: u16 = 7075;

/// Everything a [`crate::Node`] needs to run.
#[derive(Clone)]
pub struct Config {
    /// Directory holding the persistent block index.
    pub data_dir: PathBuf,
    /// The network's genesis open block.
    pub genesis: Block,
    /// Proof-of-work threshold for accepted blocks.
    pub work_threshold: u64,
    /// UDP port to bind (0 picks an ephemeral port).
    pub udp_port: u16,
    /// Cadence of the keepalive fan-out pass.
    pub keepalive_interval: Duration,
    /// Peers unreached for longer than this get a keepalive.
    pub keepalive_max_age: Duration,
    /// How many peers each keepalive advertises.
    pub peers_per_keepalive: usize,
    /// Bootstrap peers seeded into the table at startup.
    pub initial_peers: Vec<SocketAddrV6>,
}

impl Config {
    /// Live-network configuration.
    pub fn live(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            genesis: live_genesis(),
            work_threshold: LIVE_THRESHOLD,
            udp_port: DEFAULT_UDP_PORT,
            keepalive_interval: Duration::from_secs(20),
            keepalive_max_age: Duration::from_secs(300),
            peers_per_keepalive: PEERS_PER_KEEPALIVE,
            initial_peers: Vec::new(),
        }
    }

    /// Test-network configuration: test genesis and a threshold low
    /// enough to generate work in microseconds.
    pub fn test(data_dir: PathBuf) -> Self {
        Self {
            genesis: test_genesis(),
            work_threshold: TEST_THRESHOLD,
            ..Self::live(data_dir)
        }
    }
}
