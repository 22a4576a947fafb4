//! The peer table.
//!
//! Peers are kept twice: a vector for iteration and sampling, and a set
//! for O(1) membership. Both live under one mutex; every critical section
//! is short and callers work on snapshots.

use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::net::{SocketAddr, SocketAddrV6};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A known peer. Addresses are IPv6; IPv4 peers appear v6-mapped.
#[derive(Clone, Debug)]
pub struct Peer {
    pub addr: SocketAddrV6,
    /// When this node last sent the peer a keepalive.
    pub last_reachout: Option<Instant>,
}

/// Normalize any socket address into the table's IPv6 form (flow and
/// scope zeroed so equality is purely ip:port).
pub fn to_v6_mapped(addr: SocketAddr) -> SocketAddrV6 {
    match addr {
        SocketAddr::V4(v4) => SocketAddrV6::new(v4.ip().to_ipv6_mapped(), v4.port(), 0, 0),
        SocketAddr::V6(v6) => SocketAddrV6::new(*v6.ip(), v6.port(), 0, 0),
    }
}

struct PeerTable {
    list: Vec<Peer>,
    members: HashSet<SocketAddrV6>,
}

/// Shared, mutex-guarded peer set.
pub struct PeerManager {
    inner: Mutex<PeerTable>,
}

impl PeerManager {
    pub fn new(initial: impl IntoIterator<Item = SocketAddrV6>) -> Self {
        let manager = Self {
            inner: Mutex::new(PeerTable {
                list: Vec::new(),
                members: HashSet::new(),
            }),
        };
        for addr in initial {
            manager.add(addr);
        }
        manager
    }

    /// Add a newly learned peer. Returns `false` for duplicates.
    pub fn add(&self, addr: SocketAddrV6) -> bool {
        let mut table = self.inner.lock().expect("peer table lock");
        if !table.members.insert(addr) {
            return false;
        }
        table.list.push(Peer {
            addr,
            last_reachout: None,
        });
        true
    }

    pub fn contains(&self, addr: &SocketAddrV6) -> bool {
        self.inner
            .lock()
            .expect("peer table lock")
            .members
            .contains(addr)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("peer table lock").list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every known peer address, for iteration outside the lock.
    pub fn snapshot(&self) -> Vec<SocketAddrV6> {
        self.inner
            .lock()
            .expect("peer table lock")
            .list
            .iter()
            .map(|peer| peer.addr)
            .collect()
    }

    /// Up to `count` peers drawn uniformly at random.
    pub fn sample(&self, count: usize) -> Vec<SocketAddrV6> {
        let snapshot = self.snapshot();
        snapshot
            .choose_multiple(&mut rand::thread_rng(), count)
            .copied()
            .collect()
    }

    /// Peers never contacted, or last contacted more than `max_age` ago.
    pub fn due_for_reachout(&self, max_age: Duration) -> Vec<SocketAddrV6> {
        self.inner
            .lock()
            .expect("peer table lock")
            .list
            .iter()
            .filter(|peer| {
                peer.last_reachout
                    .map_or(true, |at| at.elapsed() > max_age)
            })
            .map(|peer| peer.addr)
            .collect()
    }

    /// Stamp a peer as just contacted.
    pub fn mark_reached(&self, addr: &SocketAddrV6) {
        let mut table = self.inner.lock().expect("peer table lock");
        if let Some(peer) = table.list.iter_mut().find(|peer| peer.addr == *addr) {
            peer.last_reachout = Some(Instant::now());
        }
    }
}
