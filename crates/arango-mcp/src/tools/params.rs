//! Parameter and response structs for all MCP tools.
//!
//! Wire field names follow the tool catalog contract (camelCase), so the
//! structs carry serde renames where Rust naming diverges.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── arango_query ──

/// Parameters for the `arango_query` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueryParams {
    /// AQL query string.
    #[schemars(description = "AQL query string")]
    pub query: String,
    /// Optional bind variables referenced by the query.
    #[serde(rename = "bindVars", default)]
    #[schemars(description = "Query bind variables")]
    pub bind_vars: Option<Map<String, Value>>,
}

// ── arango_insert ──

/// Parameters for the `arango_insert` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct InsertParams {
    /// Collection name.
    #[schemars(description = "Collection name")]
    pub collection: String,
    /// Document to insert.
    #[schemars(description = "Document to insert")]
    pub document: Map<String, Value>,
}

// ── arango_update ──

/// Parameters for the `arango_update` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// Collection name.
    #[schemars(description = "Collection name")]
    pub collection: String,
    /// Document key.
    #[schemars(description = "Document key")]
    pub key: String,
    /// Partial update to merge into the document.
    #[schemars(description = "Update object")]
    pub update: Map<String, Value>,
}

// ── arango_remove ──

/// Parameters for the `arango_remove` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemoveParams {
    /// Collection name.
    #[schemars(description = "Collection name")]
    pub collection: String,
    /// Document key.
    #[schemars(description = "Document key")]
    pub key: String,
}

// ── arango_create_collection ──

/// Parameters for the `arango_create_collection` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateCollectionParams {
    /// Name of the collection to create.
    #[schemars(description = "Name of the collection to create")]
    pub name: String,
    /// Collection type: 2 = document (default), 3 = edge.
    #[serde(rename = "type", default)]
    #[schemars(description = "Collection type: 2 for document collection (default), 3 for edge collection")]
    pub collection_type: Option<u8>,
    /// Whether writes wait for sync to disk (defaults to false).
    #[serde(rename = "waitForSync", default)]
    #[schemars(description = "If true, writes are synchronized to disk before returning (defaults to false)")]
    pub wait_for_sync: Option<bool>,
}

/// Response for the `arango_create_collection` tool.
///
/// A simplified descriptor: deliberately excludes any self-referential
/// handle fields the driver attaches to collection objects.
#[derive(Debug, Serialize)]
pub struct CollectionSummary {
    pub name: String,
    pub indexes: Vec<Value>,
    #[serde(rename = "type")]
    pub collection_type: &'static str,
    pub status: &'static str,
}

// ── arango_backup ──

/// Parameters for the `arango_backup` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct BackupParams {
    /// Directory to store backup files.
    #[serde(rename = "outputDir")]
    #[schemars(description = "Directory to store backup files")]
    pub output_dir: String,
    /// Single collection to back up; all collections when omitted.
    #[serde(default)]
    #[schemars(description = "Collection name to backup. If not provided, backs up all collections.")]
    pub collection: Option<String>,
    /// Cap on documents exported per collection; all documents when omitted.
    #[serde(rename = "docLimit", default)]
    #[schemars(description = "Limit the number of documents to backup per collection. If not provided, backs up all documents.")]
    pub doc_limit: Option<u64>,
}
