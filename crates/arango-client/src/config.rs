//! Connection configuration from environment variables.
//!
//! Connection target, database name, and credentials are supplied via
//! environment variables at process start and read exactly once. There is
//! no runtime reconfiguration.

use crate::error::{ClientError, ClientResult};

/// Default ArangoDB endpoint when `ARANGO_URL` is not set.
pub const DEFAULT_URL: &str = "http://localhost:8529";

/// Default database when `ARANGO_DB` is not set.
pub const DEFAULT_DATABASE: &str = "_system";

/// Resolved connection settings for the database gateway.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base endpoint URL (e.g. `http://localhost:8529`)
    pub url: String,
    /// Target database name
    pub database: String,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: String,
}

impl ConnectionConfig {
    /// Load configuration from process environment variables.
    ///
    /// `ARANGO_URL` and `ARANGO_DB` fall back to defaults; missing
    /// `ARANGO_USERNAME` or `ARANGO_PASSWORD` is a fatal configuration error.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// The seam keeps parsing testable without mutating process-global
    /// environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let url = lookup("ARANGO_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        let database = lookup("ARANGO_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let username = require(&lookup, "ARANGO_USERNAME")?;
        let password = require(&lookup, "ARANGO_PASSWORD")?;

        Ok(Self {
            url,
            database,
            username,
            password,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> ClientResult<String> {
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ClientError::config_error(format!(
            "{key} environment variable is required"
        ))),
    }
}
