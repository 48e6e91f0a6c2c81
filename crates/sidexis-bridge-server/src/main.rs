//! Sidexis bridge connector.
//!
//! Short-lived localhost WebSocket endpoint: the web client launches the
//! connector, connects, sends one patient record, and gets one status frame
//! back while the record is handed to Sidexis through the SLIDA mailslot
//! file. Then the process exits.

use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sidexis_bridge_server::config::BridgeConfig;
use sidexis_bridge_server::logfile::LogFile;
use sidexis_bridge_server::session::{self, SessionContext};

/// How long to wait for the web client to connect before giving up.
const ACCEPT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BridgeConfig::load(std::env::args().nth(1))?;
    let log = LogFile::new(&config.log_path);
    log.append("SidexisConnector has started.");

    if let Err(err) = run(&config, &log).await {
        error!("connector failed: {err:#}");
        log.append(&format!("{err:#}"));
    }

    log.append("SidexisConnector has stopped.");
    Ok(())
}

async fn run(config: &BridgeConfig, log: &LogFile) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("cannot listen on {}", config.listen_addr))?;
    info!("listening on {}", config.listen_addr);
    log.append(&format!(
        "Waiting for WebSocket client on {}...",
        config.listen_addr
    ));

    // One client, bounded wait. Reads after accept are unbounded: a client
    // that connects and then goes silent hangs the session.
    let (stream, peer) = match timeout(ACCEPT_TIMEOUT, listener.accept()).await {
        Ok(accepted) => accepted.context("accept failed")?,
        Err(_) => anyhow::bail!("no client connected within {}s", ACCEPT_TIMEOUT.as_secs()),
    };
    log.append("Connection has been established.");
    info!("client connected from {peer}");

    let ctx = SessionContext::new(config, log)?;
    session::run(stream, &ctx).await
}
