//! Backup orchestrator: chunked-parallel export of collections to JSON files.
//!
//! Collections are exported in fixed-size batches. All exports within a
//! batch run concurrently; the orchestrator waits for the whole batch to
//! settle before starting the next one, bounding peak in-flight database
//! cursors and file handles. A failing collection is recorded in its result
//! and never aborts siblings or the run.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use arango_client::{ArangoGateway, ClientError, ClientResult};

/// Number of collection exports in flight within one batch.
pub const PARALLEL_BACKUP_CHUNKS: usize = 5;

/// Outcome status of a single collection export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupStatus {
    Success,
    Error,
}

/// Per-collection export record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupResult {
    pub collection: String,
    pub status: BackupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate report for one backup invocation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupReport {
    pub status: String,
    pub output_directory: String,
    pub total_collections: usize,
    pub results: Vec<BackupResult>,
}

/// Resolve the output directory to an absolute path and create it
/// recursively with standard `rwxr-xr-x` permissions.
///
/// Failure here is fatal to the whole backup.
pub async fn prepare_output_dir(raw: &str) -> ClientResult<PathBuf> {
    let resolved = std::path::absolute(raw)?;
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(&resolved).await?;
    Ok(resolved)
}

/// Export one named collection, or every collection in the database, to
/// `<output_dir>/<collection>.json` files.
///
/// The report lists every attempted collection in chunk-submission order;
/// `total_collections` always equals `results.len()`.
pub async fn run_backup<G>(
    gateway: &G,
    output_dir: &Path,
    collection: Option<&str>,
    doc_limit: Option<u64>,
) -> ClientResult<BackupReport>
where
    G: ArangoGateway + ?Sized,
{
    let names: Vec<String> = match collection {
        Some(name) => vec![name.to_string()],
        None => {
            let collections = gateway.list_collections().await?;
            info!(count = collections.len(), "found collections to back up");
            collections.into_iter().map(|c| c.name).collect()
        }
    };

    let mut results = Vec::with_capacity(names.len());
    // Batch b+1 never starts until every export in batch b has settled.
    for chunk in names.chunks(PARALLEL_BACKUP_CHUNKS) {
        let exports = chunk
            .iter()
            .map(|name| export_collection(gateway, output_dir, name, doc_limit));
        results.extend(join_all(exports).await);
    }

    Ok(BackupReport {
        status: "completed".to_string(),
        output_directory: output_dir.display().to_string(),
        total_collections: results.len(),
        results,
    })
}

/// Export a single collection, capturing any failure in the result record.
async fn export_collection<G>(
    gateway: &G,
    output_dir: &Path,
    name: &str,
    doc_limit: Option<u64>,
) -> BackupResult
where
    G: ArangoGateway + ?Sized,
{
    info!(collection = %name, "backing up collection");

    let mut bind_vars = Map::new();
    bind_vars.insert("@collection".to_string(), Value::from(name));
    // A limit of zero is a real limit: it produces an empty export file.
    let aql = match doc_limit {
        Some(limit) => {
            bind_vars.insert("limit".to_string(), Value::from(limit));
            "FOR doc IN @@collection LIMIT @limit RETURN doc"
        }
        None => "FOR doc IN @@collection RETURN doc",
    };

    let outcome = async {
        let documents = gateway.query(aql, bind_vars).await?;
        let path = output_dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(&documents)?;
        tokio::fs::write(&path, json).await?;
        Ok::<_, ClientError>((documents.len(), path))
    }
    .await;

    match outcome {
        Ok((count, path)) => BackupResult {
            collection: name.to_string(),
            status: BackupStatus::Success,
            count: Some(count),
            output_file: Some(path.display().to_string()),
            error: None,
        },
        Err(e) => {
            warn!(collection = %name, error = %e, "collection export failed");
            BackupResult {
                collection: name.to_string(),
                status: BackupStatus::Error,
                count: None,
                output_file: None,
                error: Some(e.to_string()),
            }
        }
    }
}
