//! MCP ServerHandler implementation for ArangoDB.
//!
//! Exposes the database operations as MCP tools:
//!
//! - `arango_query` — Execute an AQL query with optional bind variables
//! - `arango_insert` — Insert a document into a collection
//! - `arango_update` — Partially update a document by key
//! - `arango_remove` — Remove a document by key
//! - `arango_list_collections` — Enumerate non-system collections
//! - `arango_create_collection` — Create a document or edge collection
//! - `arango_backup` — Export collections to JSON files on disk
//!
//! Every dispatch first runs the connection guard's reachability check, then
//! translates any gateway failure into a tagged protocol error. Unknown tool
//! identifiers are rejected by the router and never reach the gateway.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, ErrorData as McpError, Implementation, ProtocolVersion, ServerCapabilities,
    ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use arango_client::{ArangoGateway, CollectionType, ConnectionGuard};

use crate::backup;
use crate::tools::helpers::{connection_error, internal, invalid_request, text_result};
use crate::tools::*;

/// ArangoDB MCP server handler.
#[derive(Debug, Clone)]
pub struct ArangoMcpServer {
    tool_router: ToolRouter<Self>,
    gateway: Arc<dyn ArangoGateway>,
    guard: Arc<ConnectionGuard>,
}

impl ArangoMcpServer {
    /// Create a server over a gateway with the default connection guard.
    pub fn new(gateway: Arc<dyn ArangoGateway>) -> Self {
        let guard = Arc::new(ConnectionGuard::new(gateway.clone()));
        Self::with_guard(gateway, guard)
    }

    /// Create a server with an explicit guard (tests tune its retry policy).
    pub fn with_guard(gateway: Arc<dyn ArangoGateway>, guard: Arc<ConnectionGuard>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            gateway,
            guard,
        }
    }

    /// Connectivity check preceding every dispatch.
    async fn ensure_connection(&self) -> Result<(), McpError> {
        self.guard.ensure().await.map_err(|e| connection_error(&e))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for ArangoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "arango-mcp".to_string(),
                title: Some("ArangoDB MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing ArangoDB operations: AQL queries, document CRUD, \
                     collection management, and backup to disk"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "This server fronts an ArangoDB database. Use arango_query for AQL reads \
                 and complex operations (bind variables via bindVars), arango_insert/\
                 arango_update/arango_remove for document CRUD by collection and key, \
                 arango_list_collections to discover collections, and \
                 arango_create_collection to create document (type 2) or edge (type 3) \
                 collections.\n\
                 arango_backup exports collections as pretty-printed JSON files to \
                 outputDir — one file per collection, processed in bounded parallel \
                 batches. Restrict it with collection (single collection) or docLimit \
                 (documents per collection). Per-collection failures are reported in the \
                 result list without aborting the run."
                    .to_string(),
            ),
        }
    }
}

#[tool_router(router = tool_router)]
impl ArangoMcpServer {
    /// Execute an AQL query and return the materialized result set.
    #[tool(
        name = "arango_query",
        description = "Execute an AQL query. Supports bind variables via bindVars. Returns the fully materialized result set as a JSON array."
    )]
    pub async fn query(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        if params.query.trim().is_empty() {
            return Err(McpError::invalid_params("query must not be empty", None));
        }

        let bind_vars = params.bind_vars.unwrap_or_default();
        let documents = self
            .gateway
            .query(&params.query, bind_vars)
            .await
            .map_err(|e| invalid_request("Query execution failed", &e))?;

        text_result(&documents)
    }

    /// Insert a document, returning the driver-assigned metadata.
    #[tool(
        name = "arango_insert",
        description = "Insert a document into a collection. Returns the assigned save metadata (_id, _key, _rev)."
    )]
    pub async fn insert(
        &self,
        Parameters(params): Parameters<InsertParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        let meta = self
            .gateway
            .insert(&params.collection, &params.document)
            .await
            .map_err(|e| invalid_request("Insert operation failed", &e))?;

        text_result(&meta)
    }

    /// Partially update a document by key.
    #[tool(
        name = "arango_update",
        description = "Update a document in a collection by key. The update object is merged into the existing document. Returns the update metadata."
    )]
    pub async fn update(
        &self,
        Parameters(params): Parameters<UpdateParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        let meta = self
            .gateway
            .update(&params.collection, &params.key, &params.update)
            .await
            .map_err(|e| invalid_request("Update operation failed", &e))?;

        text_result(&meta)
    }

    /// Remove a document by key.
    #[tool(
        name = "arango_remove",
        description = "Remove a document from a collection by key. Returns the removal metadata."
    )]
    pub async fn remove(
        &self,
        Parameters(params): Parameters<RemoveParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        let meta = self
            .gateway
            .remove(&params.collection, &params.key)
            .await
            .map_err(|e| invalid_request("Remove operation failed", &e))?;

        text_result(&meta)
    }

    /// List all collections in the database.
    #[tool(
        name = "arango_list_collections",
        description = "List all collections in the database. Returns an array of collection descriptors."
    )]
    pub async fn list_collections(&self) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        let collections = self
            .gateway
            .list_collections()
            .await
            .map_err(|e| internal("Failed to list collections", &e))?;

        text_result(&collections)
    }

    /// Create a collection and return a simplified descriptor.
    #[tool(
        name = "arango_create_collection",
        description = "Create a new collection. type 2 creates a document collection (default), type 3 an edge collection. Returns {name, indexes, type, status}."
    )]
    pub async fn create_collection(
        &self,
        Parameters(params): Parameters<CreateCollectionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        if params.name.trim().is_empty() {
            return Err(McpError::invalid_params("name must not be empty", None));
        }
        let collection_type = match params.collection_type {
            None | Some(2) => CollectionType::Document,
            Some(3) => CollectionType::Edge,
            Some(other) => {
                return Err(McpError::invalid_params(
                    format!("type must be 2 (document) or 3 (edge), got {other}"),
                    None,
                ))
            }
        };
        let wait_for_sync = params.wait_for_sync.unwrap_or(false);

        let created = self
            .gateway
            .create_collection(&params.name, collection_type, wait_for_sync)
            .await
            .map_err(|e| invalid_request("Failed to create collection", &e))?;
        let indexes = self
            .gateway
            .list_indexes(&created.name)
            .await
            .map_err(|e| invalid_request("Failed to create collection", &e))?;

        let summary = CollectionSummary {
            collection_type: created.type_label(),
            status: created.status_label(),
            name: created.name,
            indexes,
        };
        text_result(&summary)
    }

    /// Export collections to JSON files under an output directory.
    #[tool(
        name = "arango_backup",
        description = "Backup collections to JSON files. If no collection is specified, backs up all collections in parallel batches. docLimit caps the documents exported per collection."
    )]
    pub async fn backup(
        &self,
        Parameters(params): Parameters<BackupParams>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_connection().await?;

        let output_dir = backup::prepare_output_dir(&params.output_dir)
            .await
            .map_err(|e| internal("Failed to create backup directory", &e))?;

        let report = backup::run_backup(
            self.gateway.as_ref(),
            &output_dir,
            params.collection.as_deref(),
            params.doc_limit,
        )
        .await
        .map_err(|e| internal("Backup failed", &e))?;

        text_result(&report)
    }
}
