//! Node daemon: a thin driver around `lattice-node`.

use clap::Parser;
use lattice_network::to_v6_mapped;
use lattice_node::{Config, Node, DEFAULT_UDP_PORT};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "lattice-daemon", about = "Block-lattice node daemon")]
struct Cli {
    /// Use the test network configuration.
    #[arg(long, short = 't')]
    testnet: bool,

    /// Data directory for the block store.
    #[arg(long, default_value = "./lattice_data")]
    data_dir: PathBuf,

    /// UDP port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Initial peer(s) to make contact with; the protocol port is assumed.
    #[arg(long = "peer", short = 'p')]
    peers: Vec<IpAddr>,
}

/// `RUST_LOG` wins; otherwise default to `info`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = if cli.testnet {
        Config::test(cli.data_dir)
    } else {
        Config::live(cli.data_dir)
    };
    if let Some(port) = cli.port {
        config.udp_port = port;
    }
    for ip in cli.peers {
        config
            .initial_peers
            .push(to_v6_mapped(SocketAddr::new(ip, DEFAULT_UDP_PORT)));
    }

    let network = if cli.testnet { "test" } else { "live" };
    tracing::info!(network, "starting node");

    let node = Arc::new(Node::new(config)?);
    let running = Arc::clone(&node).start().await?;
    tracing::info!(addr = %running.local_addr, "node running, ctrl-c to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    running.stop().await;

    Ok(())
}
