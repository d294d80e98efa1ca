//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (token missing or expired)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// API returned a non-success envelope
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Reorder error type
#[derive(Debug, Error)]
pub enum ReorderError {
    /// A write in the batch failed. Writes before it stay applied, the rest
    /// of the batch was not sent.
    #[error(
        "sort order write for {entity_id} failed after {applied} applied ({abandoned} abandoned): {source}"
    )]
    Sync {
        entity_id: String,
        applied: usize,
        abandoned: usize,
        #[source]
        source: ClientError,
    },

    /// Another batch is running on the same list
    #[error("reorder already in progress for {scope}")]
    Busy { scope: String },

    /// Loading the list snapshot failed
    #[error("failed to load list {scope}: {source}")]
    Fetch {
        scope: String,
        #[source]
        source: ClientError,
    },
}

pub type ReorderResult<T> = Result<T, ReorderError>;
