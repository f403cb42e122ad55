//! # Client Error Types
//!
//! Unified error handling for arango-client library operations.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Comprehensive error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("ArangoDB error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Database connection lost: {0}")]
    ConnectionLost(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Create an API error from an HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create an invalid response error for protocol violations
    ///
    /// Use this when a response is missing required fields or contains
    /// malformed data. This indicates a protocol violation that should not
    /// be silently defaulted.
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable (worth retrying)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::HttpError(e) => e.is_timeout() || e.is_connect(),
            ClientError::ConnectionLost(_) => true,
            ClientError::ApiError { status, .. } => *status >= 500,
            // Protocol violations are not recoverable - the server is broken
            ClientError::InvalidResponse { .. } => false,
            _ => false,
        }
    }

    /// Check if the message indicates a connection-level fault rather than
    /// a data error. Used to re-label failures for operators.
    #[must_use]
    pub fn is_connection_fault(&self) -> bool {
        if matches!(self, ClientError::ConnectionLost(_)) {
            return true;
        }
        if let ClientError::HttpError(e) = self {
            if e.is_connect() || e.is_timeout() {
                return true;
            }
        }
        let message = self.to_string().to_lowercase();
        message.contains("connect") || message.contains("timed out")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Constructor tests ----

    #[test]
    fn test_api_error_constructor() {
        let err = ClientError::api_error(404, "collection not found");
        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "collection not found");
            }
            _ => panic!("Expected ApiError variant"),
        }
    }

    #[test]
    fn test_config_error_constructor() {
        let err = ClientError::config_error("missing credentials");
        match err {
            ClientError::ConfigError(msg) => assert_eq!(msg, "missing credentials"),
            _ => panic!("Expected ConfigError variant"),
        }
    }

    #[test]
    fn test_invalid_response_constructor() {
        let err = ClientError::invalid_response("cursor.id", "missing field");
        match err {
            ClientError::InvalidResponse { field, reason } => {
                assert_eq!(field, "cursor.id");
                assert_eq!(reason, "missing field");
            }
            _ => panic!("Expected InvalidResponse variant"),
        }
    }

    // ---- is_recoverable tests ----

    #[test]
    fn test_connection_lost_is_recoverable() {
        let err = ClientError::ConnectionLost("refused".to_string());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_api_error_503_is_recoverable() {
        let err = ClientError::api_error(503, "service unavailable");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_api_error_400_not_recoverable() {
        let err = ClientError::api_error(400, "bad AQL");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_invalid_response_not_recoverable() {
        let err = ClientError::invalid_response("field", "broken");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_auth_error_not_recoverable() {
        let err = ClientError::AuthError("invalid token".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_invalid_input_not_recoverable() {
        let err = ClientError::InvalidInput("empty query".to_string());
        assert!(!err.is_recoverable());
    }

    // ---- is_connection_fault tests ----

    #[test]
    fn test_connection_lost_is_connection_fault() {
        let err = ClientError::ConnectionLost("refused".to_string());
        assert!(err.is_connection_fault());
    }

    #[test]
    fn test_api_error_with_connect_wording_is_connection_fault() {
        let err = ClientError::api_error(500, "could not connect to endpoint");
        assert!(err.is_connection_fault());
    }

    #[test]
    fn test_api_error_without_connect_wording_not_connection_fault() {
        let err = ClientError::api_error(409, "unique constraint violated");
        assert!(!err.is_connection_fault());
    }

    // ---- Display tests ----

    #[test]
    fn test_display_api_error() {
        let err = ClientError::api_error(404, "document not found");
        assert_eq!(format!("{err}"), "ArangoDB error: 404 - document not found");
    }

    #[test]
    fn test_display_config_error() {
        let err = ClientError::config_error("ARANGO_USERNAME is required");
        assert_eq!(
            format!("{err}"),
            "Configuration error: ARANGO_USERNAME is required"
        );
    }

    #[test]
    fn test_display_connection_lost() {
        let err = ClientError::ConnectionLost("refused".to_string());
        assert_eq!(format!("{err}"), "Database connection lost: refused");
    }

    #[test]
    fn test_display_invalid_response() {
        let err = ClientError::invalid_response("cursor.id", "missing");
        assert_eq!(format!("{err}"), "Invalid response: cursor.id - missing");
    }

    // ---- From impls ----

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad}}").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::SerializationError(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::IoError(_)));
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: ClientError = url_err.into();
        assert!(matches!(err, ClientError::UrlError(_)));
    }
}
