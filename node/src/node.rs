//! The UDP receive loop, dispatch table, and keepalive fan-out.

use crate::{Config, NodeError};
use lattice_ledger::Block;
use lattice_network::{to_v6_mapped, Alarm, PeerManager};
use lattice_store::{BlockStore, StoreConfig, StoreOutcome};
use lattice_wire::{Message, Payload, WireError};
use std::net::{Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Datagrams are read into a buffer of this size; the protocol's bodies
/// all fit well within it.
const PACKET_SIZE: usize = 512;

/// A node: configuration, block store, peer table.
pub struct Node {
    config: Config,
    store: Arc<BlockStore>,
    peers: Arc<PeerManager>,
}

/// Handles for a started node; dropping it leaks the tasks, `stop` joins
/// them.
pub struct RunningNode {
    pub local_addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    receive_task: JoinHandle<()>,
    keepalive_alarm: Alarm,
}

impl Node {
    /// Open the store (writing genesis on first start) and seed the peer
    /// table. No sockets yet.
    pub fn new(config: Config) -> Result<Self, NodeError> {
        let store = Arc::new(BlockStore::open(StoreConfig {
            path: config.data_dir.join("blocks"),
            genesis: config.genesis.clone(),
            work_threshold: config.work_threshold,
        })?);
        let peers = Arc::new(PeerManager::new(config.initial_peers.iter().copied()));
        Ok(Self {
            config,
            store,
            peers,
        })
    }

    pub fn store(&self) -> &Arc<BlockStore> {
        &self.store
    }

    pub fn peers(&self) -> &Arc<PeerManager> {
        &self.peers
    }

    /// Bind the UDP socket and spawn the receive loop and the keepalive
    /// timer.
    pub async fn start(self: Arc<Self>) -> Result<RunningNode, NodeError> {
        let socket = Arc::new(
            UdpSocket::bind((Ipv6Addr::UNSPECIFIED, self.config.udp_port)).await?,
        );
        let local_addr = socket.local_addr()?;
        tracing::info!(%local_addr, "listening for udp datagrams");

        let (shutdown, mut stopped) = watch::channel(false);

        let node = Arc::clone(&self);
        let recv_socket = Arc::clone(&socket);
        let receive_task = tokio::spawn(async move {
            let mut buf = [0u8; PACKET_SIZE];
            loop {
                tokio::select! {
                    _ = stopped.changed() => return,
                    received = recv_socket.recv_from(&mut buf) => match received {
                        Ok((len, from)) => node.handle_datagram(&buf[..len], from),
                        Err(err) => tracing::warn!(%err, "udp receive failed"),
                    },
                }
            }
        });

        let node = Arc::clone(&self);
        let alarm_socket = Arc::clone(&socket);
        let keepalive_alarm = Alarm::start(self.config.keepalive_interval, move || {
            let node = Arc::clone(&node);
            let socket = Arc::clone(&alarm_socket);
            async move { node.send_keepalives(&socket).await }
        });

        Ok(RunningNode {
            local_addr,
            shutdown,
            receive_task,
            keepalive_alarm,
        })
    }

    /// Dispatch one datagram. Malformed or unsupported input is logged
    /// and dropped; nothing a peer sends can take the loop down.
    pub fn handle_datagram(&self, buf: &[u8], from: SocketAddr) {
        let message = match Message::decode(buf) {
            Ok(message) => message,
            Err(WireError::Unsupported(message_type)) => {
                tracing::debug!(?message_type, %from, "dropping unsupported message");
                return;
            }
            Err(err) => {
                tracing::debug!(%err, %from, len = buf.len(), "dropping malformed datagram");
                return;
            }
        };

        match message.payload {
            Payload::Keepalive(keepalive) => {
                let sender = to_v6_mapped(from);
                if self.peers.add(sender) {
                    tracing::debug!(peer = %sender, "learned peer from keepalive sender");
                }
                for peer in keepalive.advertised() {
                    if self.peers.add(*peer) {
                        tracing::debug!(peer = %peer, "learned advertised peer");
                    }
                }
            }
            Payload::Publish(block) => self.submit_block(block, from),
            Payload::ConfirmAck(ack) => self.submit_block(ack.block, from),
            Payload::ConfirmReq(block) => {
                // Answering needs a voting subsystem; decode and note it.
                tracing::debug!(hash = %block.hash(), %from, "confirm request received");
            }
        }
    }

    fn submit_block(&self, block: Block, from: SocketAddr) {
        let hash = block.hash();
        match self.store.store(&block) {
            Ok(StoreOutcome::Stored) => {
                tracing::debug!(%hash, kind = block.kind_name(), "stored block from network");
            }
            Ok(StoreOutcome::Parked) => {
                tracing::debug!(%hash, parent = %block.previous(), "parked block from network");
            }
            Err(err) => {
                tracing::warn!(%hash, %err, %from, "rejected block");
            }
        }
    }

    /// One fan-out pass: every peer whose last reach-out is unset or too
    /// old gets a keepalive carrying a random sample of the table.
    async fn send_keepalives(&self, socket: &UdpSocket) {
        for peer in self.peers.due_for_reachout(self.config.keepalive_max_age) {
            let sample = self.peers.sample(self.config.peers_per_keepalive);
            let message = Message::keepalive(&sample);
            match socket.send_to(&message.encode(), SocketAddr::V6(peer)).await {
                Ok(_) => {
                    tracing::trace!(%peer, "sent keepalive");
                    self.peers.mark_reached(&peer);
                }
                Err(err) => tracing::warn!(%peer, %err, "keepalive send failed"),
            }
        }
    }
}

impl RunningNode {
    /// Stop the receive loop and the keepalive timer, waiting for both.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.receive_task.await;
        self.keepalive_alarm.stop().await;
    }
}
