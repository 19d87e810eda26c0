//! Error types for the artifact repository client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the artifact repository service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service answered with a status other than the one the operation requires
    #[error("{operation} failed (expected status {expected}, got {status}): {body}")]
    UnexpectedStatus {
        /// Operation that was attempted (e.g. "search")
        operation: &'static str,
        /// Status code the operation reports on success
        expected: u16,
        /// Status code actually returned
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Failed to read a local file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unexpected(status: u16) -> ClientError {
        ClientError::UnexpectedStatus {
            operation: "delete",
            expected: 204,
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_display_names_operation() {
        assert_eq!(
            unexpected(500).to_string(),
            "delete failed (expected status 204, got 500): "
        );
    }
}
