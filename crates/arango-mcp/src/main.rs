//! ArangoDB MCP Server
//!
//! Model Context Protocol server exposing ArangoDB operations (AQL queries,
//! document CRUD, collection management, backup to disk) to LLM agents and
//! developer tools over stdio.

use std::sync::Arc;

use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use arango_client::{ConnectionConfig, RestGateway};
use arango_mcp::server::ArangoMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("arango_mcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ConnectionConfig::from_env()?;
    tracing::info!(
        url = %config.url,
        database = %config.database,
        "arango-mcp starting (stdio transport)"
    );

    let gateway = Arc::new(RestGateway::new(&config)?);
    let server = ArangoMcpServer::new(gateway);
    let transport = rmcp::transport::io::stdio();

    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
