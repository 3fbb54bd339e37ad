//! REST server for parsed documents.
//!
//! Serves each document's outline and extracted images from an outputs
//! directory laid out as `<outputs>/<id>/output_tree.json` and
//! `<outputs>/<id>/images/*`.

use anyhow::Context;
use clap::Parser;
use outline_viewer::config::ServerArgs;
use outline_viewer::server::make_http_server;
use outline_viewer::store::DocumentStore;
use outline_viewer::logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let args = ServerArgs::parse();

    let store = Arc::new(DocumentStore::new(&args.outputs_dir));
    let documents = store
        .list_documents()
        .context("failed to scan the outputs directory")?;
    tracing::info!(
        outputs = %args.outputs_dir.display(),
        documents = documents.len(),
        "document store ready"
    );

    let server = make_http_server(args.socket_addr(), store)
        .await
        .with_context(|| format!("failed to bind {}", args.socket_addr()))?;
    tracing::info!("API: http://{}/api", server.addr);
    tracing::info!("Health: http://{}/health", server.addr);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    tracing::info!("shutting down");
    server.shutdown().await;
    Ok(())
}
