//! Database gateway: the trait seam the server dispatches through, plus the
//! REST implementation speaking the ArangoDB HTTP API.
//!
//! Every method materializes its full result before returning; callers never
//! observe partial state across a suspension point.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::config::ConnectionConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{CollectionDescriptor, CollectionType, DocumentMeta};

/// Bind variables for an AQL query.
pub type BindVars = Map<String, Value>;

/// Request timeout applied to every gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the tool dispatcher requires from the database.
///
/// Object-safe so the server and tests can hold `Arc<dyn ArangoGateway>`
/// and swap in doubles.
#[async_trait]
pub trait ArangoGateway: Send + Sync + std::fmt::Debug {
    /// Execute an AQL query and materialize the full result set.
    async fn query(&self, aql: &str, bind_vars: BindVars) -> ClientResult<Vec<Value>>;

    /// Save a document, returning the driver-assigned metadata.
    async fn insert(&self, collection: &str, document: &Map<String, Value>)
        -> ClientResult<DocumentMeta>;

    /// Apply a partial update to a document by key.
    async fn update(
        &self,
        collection: &str,
        key: &str,
        patch: &Map<String, Value>,
    ) -> ClientResult<DocumentMeta>;

    /// Remove a document by key.
    async fn remove(&self, collection: &str, key: &str) -> ClientResult<DocumentMeta>;

    /// Enumerate non-system collections.
    async fn list_collections(&self) -> ClientResult<Vec<CollectionDescriptor>>;

    /// Create a collection and return its descriptor.
    async fn create_collection(
        &self,
        name: &str,
        collection_type: CollectionType,
        wait_for_sync: bool,
    ) -> ClientResult<CollectionDescriptor>;

    /// List the indexes of a collection.
    async fn list_indexes(&self, collection: &str) -> ClientResult<Vec<Value>>;

    /// Cheap reachability probe used by the connection guard.
    async fn ping(&self) -> ClientResult<()>;
}

/// Error envelope ArangoDB attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ArangoErrorBody {
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

/// One page of an AQL cursor.
#[derive(Debug, Deserialize)]
struct CursorResponse {
    #[serde(default)]
    result: Vec<Value>,
    #[serde(rename = "hasMore", default)]
    has_more: bool,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CollectionListResponse {
    #[serde(default)]
    result: Vec<CollectionDescriptor>,
}

#[derive(Debug, Deserialize)]
struct IndexListResponse {
    #[serde(default)]
    indexes: Vec<Value>,
}

/// `ArangoGateway` implementation over the ArangoDB HTTP API.
///
/// All requests are scoped to one database (`/_db/{name}/_api/...`) and
/// authenticated with basic auth, mirroring the deployment contract of the
/// server this gateway fronts.
#[derive(Debug, Clone)]
pub struct RestGateway {
    http: Client,
    base_url: Url,
    database: String,
    username: String,
    password: String,
}

impl RestGateway {
    /// Build a gateway from connection config with the default timeout.
    pub fn new(config: &ConnectionConfig) -> ClientResult<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Build a gateway with an explicit request timeout.
    pub fn with_timeout(config: &ConnectionConfig, timeout: Duration) -> ClientResult<Self> {
        let base_url = Url::parse(&config.url)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            database: config.database.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn api_url(&self, path: &str) -> ClientResult<Url> {
        Ok(self
            .base_url
            .join(&format!("/_db/{}/_api/{}", self.database, path))?)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Decode a response, translating non-2xx statuses into tagged errors
    /// that preserve the server's `errorMessage` verbatim.
    async fn decode<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ArangoErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::AuthError(message)),
            _ => Err(ClientError::api_error(status.as_u16(), message)),
        }
    }
}

#[async_trait]
impl ArangoGateway for RestGateway {
    async fn query(&self, aql: &str, bind_vars: BindVars) -> ClientResult<Vec<Value>> {
        debug!(query = %aql, "executing AQL query");
        let url = self.api_url("cursor")?;
        let body = serde_json::json!({ "query": aql, "bindVars": bind_vars });

        let response = self.request(Method::POST, url).json(&body).send().await?;
        let mut cursor: CursorResponse = self.decode(response).await?;
        let mut documents = std::mem::take(&mut cursor.result);

        // Drain continuation batches until the cursor is exhausted.
        while cursor.has_more {
            let id = cursor.id.clone().ok_or_else(|| {
                ClientError::invalid_response("cursor.id", "continuation cursor without an id")
            })?;
            let url = self.api_url(&format!("cursor/{id}"))?;
            let response = self.request(Method::PUT, url).send().await?;
            cursor = self.decode(response).await?;
            documents.append(&mut cursor.result);
        }

        debug!(count = documents.len(), "query result materialized");
        Ok(documents)
    }

    async fn insert(
        &self,
        collection: &str,
        document: &Map<String, Value>,
    ) -> ClientResult<DocumentMeta> {
        let url = self.api_url(&format!("document/{collection}"))?;
        let response = self.request(Method::POST, url).json(document).send().await?;
        self.decode(response).await
    }

    async fn update(
        &self,
        collection: &str,
        key: &str,
        patch: &Map<String, Value>,
    ) -> ClientResult<DocumentMeta> {
        let url = self.api_url(&format!("document/{collection}/{key}"))?;
        let response = self.request(Method::PATCH, url).json(patch).send().await?;
        self.decode(response).await
    }

    async fn remove(&self, collection: &str, key: &str) -> ClientResult<DocumentMeta> {
        let url = self.api_url(&format!("document/{collection}/{key}"))?;
        let response = self.request(Method::DELETE, url).send().await?;
        self.decode(response).await
    }

    async fn list_collections(&self) -> ClientResult<Vec<CollectionDescriptor>> {
        let mut url = self.api_url("collection")?;
        url.query_pairs_mut().append_pair("excludeSystem", "true");
        let response = self.request(Method::GET, url).send().await?;
        let list: CollectionListResponse = self.decode(response).await?;
        Ok(list.result)
    }

    async fn create_collection(
        &self,
        name: &str,
        collection_type: CollectionType,
        wait_for_sync: bool,
    ) -> ClientResult<CollectionDescriptor> {
        let url = self.api_url("collection")?;
        let body = serde_json::json!({
            "name": name,
            "type": collection_type.code(),
            "waitForSync": wait_for_sync,
        });
        let response = self.request(Method::POST, url).json(&body).send().await?;
        self.decode(response).await
    }

    async fn list_indexes(&self, collection: &str) -> ClientResult<Vec<Value>> {
        let mut url = self.api_url("index")?;
        url.query_pairs_mut().append_pair("collection", collection);
        let response = self.request(Method::GET, url).send().await?;
        let list: IndexListResponse = self.decode(response).await?;
        Ok(list.indexes)
    }

    async fn ping(&self) -> ClientResult<()> {
        let url = self.api_url("version")?;
        let response = self.request(Method::GET, url).send().await?;
        let info: Value = self.decode(response).await?;
        debug!(
            version = info.get("version").and_then(|v| v.as_str()).unwrap_or("unknown"),
            "ArangoDB reachable"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ConnectionConfig {
        ConnectionConfig {
            url: "http://localhost:8529".to_string(),
            database: "orders".to_string(),
            username: "svc".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_api_url_is_database_scoped() {
        let gateway = RestGateway::new(&test_config()).unwrap();
        let url = gateway.api_url("cursor").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8529/_db/orders/_api/cursor");
    }

    #[test]
    fn test_api_url_with_path_segments() {
        let gateway = RestGateway::new(&test_config()).unwrap();
        let url = gateway.api_url("document/users/42").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8529/_db/orders/_api/document/users/42"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = test_config();
        config.url = "not a url".to_string();
        let result = RestGateway::new(&config);
        assert!(matches!(result, Err(ClientError::UrlError(_))));
    }

    #[test]
    fn test_cursor_response_defaults() {
        let cursor: CursorResponse = serde_json::from_str(r#"{"result": []}"#).unwrap();
        assert!(!cursor.has_more);
        assert!(cursor.id.is_none());
    }
}
