//! Error types for the Hive client.

use thiserror::Error;

/// Result type for Hive operations.
pub type HiveResult<T> = Result<T, HiveError>;

/// Errors that can occur while talking to the registry.
///
/// None of these are retried here. The reconciliation host re-runs the whole
/// operation if it wants another attempt.
#[derive(Debug, Error)]
pub enum HiveError {
    /// The request never produced an HTTP response.
    #[error("failed to execute request: {message}")]
    Transport { message: String },

    /// The registry answered with something other than 200 OK.
    #[error("bad response: {status}")]
    HttpStatus { status: String },

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Caller-supplied data failed local validation and was never sent.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The registry reported a business-rule failure.
    #[error("{message}")]
    Operation { message: String },

    /// A union member this client does not know about.
    #[error("unexpected type {typename} in {operation} response")]
    UnexpectedResponseShape { operation: String, typename: String },
}

impl HiveError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
        }
    }

    pub fn unexpected(operation: impl Into<String>, typename: impl Into<String>) -> Self {
        Self::UnexpectedResponseShape {
            operation: operation.into(),
            typename: typename.into(),
        }
    }

    /// Short title for user-facing diagnostics.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "Transport error",
            Self::HttpStatus { .. } => "Unexpected HTTP status",
            Self::Decode { .. } => "Malformed response",
            Self::InvalidInput { .. } => "Invalid input",
            Self::Operation { .. } => "Hive error",
            Self::UnexpectedResponseShape { .. } => "Unexpected response",
        }
    }

    /// Whether repeating the same call could succeed. Always false: failures
    /// surface immediately and the host decides whether to apply again.
    pub fn is_retriable(&self) -> bool {
        false
    }
}

impl From<reqwest::Error> for HiveError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            HiveError::decode(err.to_string())
        } else {
            HiveError::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HiveError {
    fn from(err: serde_json::Error) -> Self {
        HiveError::decode(err.to_string())
    }
}
