//! Keepalive bodies: exactly eight peer slots.

use crate::reader::Reader;
use crate::WireError;
use std::net::{Ipv6Addr, SocketAddrV6};

/// Peer entries in every keepalive, used or not.
pub const PEERS_PER_KEEPALIVE: usize = 8;

/// A keepalive body. Each slot is a 16-byte IPv6 address followed by a
/// little-endian port; unused slots are all zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keepalive {
    pub peers: [SocketAddrV6; PEERS_PER_KEEPALIVE],
}

fn empty_slot() -> SocketAddrV6 {
    SocketAddrV6::new(Ipv6Addr::UNSPECIFIED, 0, 0, 0)
}

impl Keepalive {
    /// Build a keepalive from up to eight peers; extra peers are dropped
    /// and missing slots zeroed.
    pub fn new(peers: &[SocketAddrV6]) -> Self {
        let mut slots = [empty_slot(); PEERS_PER_KEEPALIVE];
        for (slot, peer) in slots.iter_mut().zip(peers) {
            *slot = *peer;
        }
        Self { peers: slots }
    }

    /// The non-empty slots.
    pub fn advertised(&self) -> impl Iterator<Item = &SocketAddrV6> {
        self.peers
            .iter()
            .filter(|peer| !(peer.ip().is_unspecified() && peer.port() == 0))
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        for peer in &self.peers {
            out.extend_from_slice(&peer.ip().octets());
            out.extend_from_slice(&peer.port().to_le_bytes());
        }
    }

    pub(crate) fn decode(r: &mut Reader<'_>) -> Result<Self, WireError> {
        let mut slots = [empty_slot(); PEERS_PER_KEEPALIVE];
        for slot in &mut slots {
            let ip = Ipv6Addr::from(r.take::<16>()?);
            let port = u16::from_le_bytes(r.take::<2>()?);
            *slot = SocketAddrV6::new(ip, port, 0, 0);
        }
        Ok(Self { peers: slots })
    }
}
