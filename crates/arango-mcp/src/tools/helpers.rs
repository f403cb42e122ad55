//! Shared helper functions for MCP tool implementations.
//!
//! Every tool failure funnels through one of the translators here, so raw
//! driver errors never leak to callers untagged.

use arango_client::ClientError;
use rmcp::model::{CallToolResult, Content, ErrorData as McpError};
use serde::Serialize;

/// Wrap a serializable value as a single pretty-printed JSON text block.
pub fn text_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization failed: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Translate an operation-level gateway failure into an invalid-request
/// error with the operation's context prefixed.
pub fn invalid_request(context: &str, error: &ClientError) -> McpError {
    McpError::invalid_request(format!("{context}: {error}"), None)
}

/// Translate an infrastructure-level failure into an internal error.
pub fn internal(context: &str, error: &ClientError) -> McpError {
    McpError::internal_error(format!("{context}: {error}"), None)
}

/// Translate a connectivity-check failure.
///
/// Failures with connection-level wording are re-labeled so operators can
/// distinguish transient outages from data errors.
pub fn connection_error(error: &ClientError) -> McpError {
    let message = match error {
        // Already carries the label in its Display form
        ClientError::ConnectionLost(_) => error.to_string(),
        e if e.is_connection_fault() => format!("Database connection lost: {e}"),
        e => format!("Database error: {e}"),
    };
    McpError::internal_error(message, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_result_pretty_prints() {
        let result = text_result(&serde_json::json!({"a": 1})).unwrap();
        let text = result.content[0].raw.as_text().unwrap();
        assert_eq!(text.text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_invalid_request_prefixes_context() {
        let err = invalid_request(
            "Query execution failed",
            &ClientError::api_error(400, "syntax error near 'FORR'"),
        );
        assert!(err.message.contains("Query execution failed"));
        assert!(err.message.contains("syntax error"));
    }

    #[test]
    fn test_connection_fault_relabeled() {
        let err = connection_error(&ClientError::ConnectionLost("refused".into()));
        assert!(err.message.starts_with("Database connection lost"));
    }

    #[test]
    fn test_non_connection_fault_generic_label() {
        let err = connection_error(&ClientError::api_error(500, "out of memory"));
        assert!(err.message.starts_with("Database error"));
    }
}
