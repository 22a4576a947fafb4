//! End-to-end tests over a real UDP socket on localhost.

use lattice_crypto::keypair_from_private;
use lattice_ledger::genesis::{test_genesis, GENESIS_AMOUNT, TEST_PRIVATE_KEY};
use lattice_node::{Config, Node, RunningNode};
use lattice_types::{Amount, PrivateKey, PublicKey, Signature, WorkNonce};
use lattice_wire::Message;
use lattice_work::{WorkGenerator, TEST_THRESHOLD};
use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::UdpSocket;

async fn start_test_node(dir: &TempDir) -> (Arc<Node>, RunningNode) {
    let mut config = Config::test(dir.path().join("data"));
    config.udp_port = 0;
    let node = Arc::new(Node::new(config).unwrap());
    let running = Arc::clone(&node).start().await.unwrap();
    (node, running)
}

fn node_target(running: &RunningNode) -> SocketAddr {
    SocketAddr::from((Ipv6Addr::LOCALHOST, running.local_addr.port()))
}

/// A valid send from the test genesis account, sealed with work and a
/// signature.
fn sealed_genesis_send(destination: PublicKey, amount: u128) -> lattice_ledger::Block {
    let keys = keypair_from_private(PrivateKey::from_hex(TEST_PRIVATE_KEY).unwrap());
    let mut block = lattice_ledger::Block::send(
        test_genesis().hash(),
        destination,
        GENESIS_AMOUNT.wrapping_sub(Amount::new(amount)),
        WorkNonce::ZERO,
        Signature::ZERO,
    );
    block.work = WorkGenerator::new()
        .generate(&block.root(), TEST_THRESHOLD)
        .unwrap();
    block.sign(&keys.private);
    block
}

async fn wait_for<F: Fn() -> bool>(what: &str, check: F) {
    for _ in 0..250 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("timed out waiting for {what}");
}

#[tokio::test]
async fn published_block_lands_in_the_store() {
    let dir = TempDir::new().unwrap();
    let (node, running) = start_test_node(&dir).await;

    let block = sealed_genesis_send(PublicKey([0x09; 32]), 7);
    let hash = block.hash();

    let socket = UdpSocket::bind((Ipv6Addr::LOCALHOST, 0)).await.unwrap();
    socket
        .send_to(&Message::publish(block).encode(), node_target(&running))
        .await
        .unwrap();

    let store = Arc::clone(node.store());
    wait_for("published block to be stored", move || {
        store.fetch(&hash).unwrap().is_some()
    })
    .await;

    running.stop().await;
}

#[tokio::test]
async fn confirm_ack_block_lands_in_the_store() {
    let dir = TempDir::new().unwrap();
    let (node, running) = start_test_node(&dir).await;

    let keys = keypair_from_private(PrivateKey::from_hex(TEST_PRIVATE_KEY).unwrap());
    let block = sealed_genesis_send(PublicKey([0x0A; 32]), 3);
    let hash = block.hash();
    let ack = lattice_wire::ConfirmAck::new(&keys, 1, block);

    let socket = UdpSocket::bind((Ipv6Addr::LOCALHOST, 0)).await.unwrap();
    socket
        .send_to(&Message::confirm_ack(ack).encode(), node_target(&running))
        .await
        .unwrap();

    let store = Arc::clone(node.store());
    wait_for("voted block to be stored", move || {
        store.fetch(&hash).unwrap().is_some()
    })
    .await;

    running.stop().await;
}

#[tokio::test]
async fn keepalive_gossip_grows_the_peer_table() {
    let dir = TempDir::new().unwrap();
    let (node, running) = start_test_node(&dir).await;

    let advertised = [
        SocketAddrV6::new(Ipv6Addr::new(0, 0, 0, 0, 0, 0xFFFF, 0x0A00, 1), 7075, 0, 0),
        SocketAddrV6::new(Ipv6Addr::new(0, 0, 0, 0, 0, 0xFFFF, 0x0A00, 2), 7075, 0, 0),
    ];

    let socket = UdpSocket::bind((Ipv6Addr::LOCALHOST, 0)).await.unwrap();
    socket
        .send_to(
            &Message::keepalive(&advertised).encode(),
            node_target(&running),
        )
        .await
        .unwrap();

    let peers = Arc::clone(node.peers());
    wait_for("advertised peers to be learned", move || {
        peers.contains(&advertised[0]) && peers.contains(&advertised[1])
    })
    .await;

    // The sender itself was learned too.
    assert_eq!(node.peers().len(), 3);

    running.stop().await;
}

#[tokio::test]
async fn malformed_datagrams_do_not_kill_the_receive_loop() {
    let dir = TempDir::new().unwrap();
    let (node, running) = start_test_node(&dir).await;

    let socket = UdpSocket::bind((Ipv6Addr::LOCALHOST, 0)).await.unwrap();
    let target = node_target(&running);

    // Garbage, a bad magic, and a truncated header.
    socket.send_to(&[0xFF; 64], target).await.unwrap();
    socket.send_to(b"XXnot a message", target).await.unwrap();
    socket.send_to(b"RC", target).await.unwrap();

    // The loop is still alive: a valid keepalive is processed afterwards.
    socket
        .send_to(&Message::keepalive(&[]).encode(), target)
        .await
        .unwrap();

    let peers = Arc::clone(node.peers());
    wait_for("sender to be learned after garbage", move || {
        peers.len() == 1
    })
    .await;

    running.stop().await;
}

#[tokio::test]
async fn node_fans_out_keepalives_to_bootstrap_peers() {
    // Bind the "remote peer" socket first so the node can reach out to it.
    let peer_socket = UdpSocket::bind((Ipv6Addr::LOCALHOST, 0)).await.unwrap();
    let peer_port = peer_socket.local_addr().unwrap().port();

    let dir = TempDir::new().unwrap();
    let mut config = Config::test(dir.path().join("data"));
    config.udp_port = 0;
    config
        .initial_peers
        .push(SocketAddrV6::new(Ipv6Addr::LOCALHOST, peer_port, 0, 0));
    let node = Arc::new(Node::new(config).unwrap());
    let running = Arc::clone(&node).start().await.unwrap();

    // The first fan-out pass fires immediately on startup.
    let mut buf = [0u8; 512];
    let (len, _) = tokio::time::timeout(
        Duration::from_secs(5),
        peer_socket.recv_from(&mut buf),
    )
    .await
    .expect("no keepalive within 5s")
    .unwrap();

    let message = Message::decode(&buf[..len]).unwrap();
    assert!(matches!(
        message.payload,
        lattice_wire::Payload::Keepalive(_)
    ));

    running.stop().await;
}
