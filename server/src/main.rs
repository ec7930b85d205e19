use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use item_server::{telemetry, Config, ItemStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init(config.log_format)
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        id_assignment = ?config.id_assignment,
        "server is running on http://{}",
        listener.local_addr()?
    );

    let store = Arc::new(ItemStore::new(config.id_assignment));
    item_server::run(listener, store).await?;
    Ok(())
}
