//! ArangoDB HTTP API client library.
//!
//! Provides the [`ArangoGateway`] trait the MCP server dispatches through,
//! the [`RestGateway`] implementation over the ArangoDB HTTP API, the
//! [`ConnectionGuard`] connectivity collaborator, and environment-variable
//! configuration.

pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod types;

pub use config::ConnectionConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{ArangoGateway, BindVars, RestGateway};
pub use guard::ConnectionGuard;
pub use types::{CollectionDescriptor, CollectionStatus, CollectionType, DocumentMeta};
