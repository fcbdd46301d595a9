// Standalone MCP server binary

use anyhow::Result;
use msk_mcp::resources::{
    BestPracticesCatalogResource, ClusterBestPracticesResource, ResourceRegistry,
};
use msk_mcp::server::McpServer;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("MSK MCP server starting...");

    let mut registry = ResourceRegistry::new();
    registry.register(Arc::new(BestPracticesCatalogResource));
    registry.register(Arc::new(ClusterBestPracticesResource));

    tracing::info!("Registered {} resources", registry.len());

    let server = McpServer::new(registry);
    server.run().await?;

    Ok(())
}
