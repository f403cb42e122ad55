//! ArangoDB MCP Server library.
//!
//! Provides the [`ArangoMcpServer`](server::ArangoMcpServer) MCP server
//! handler, the backup orchestrator, and tool parameter/response types.
//! Used by the `arango-mcp` binary and available for integration testing.

pub mod backup;
pub mod server;
pub mod tools;
