//! Error types and error handling for the folk document store.
//!
//! This module defines the error types used throughout the
//! application. Adapter-specific presentation (CLI exit codes,
//! colored output) is handled in the respective adapter modules.

use crate::core::types::DocId;
use thiserror::Error;

/// Result type alias for folk operations
pub type Result<T> = std::result::Result<T, FolkError>;

/// Main error type for the folk store
#[derive(Error, Debug)]
pub enum FolkError {
    #[error("document not found: {0}")]
    NotFound(DocId),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("search query missing")]
    EmptyQuery,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Document id space exhausted")]
    IdSpaceExhausted,

    #[error("Index synchronizer is not running")]
    SynchronizerClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl FolkError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, FolkError::NotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            FolkError::EmptyQuery
                | FolkError::InvalidQuery(_)
                | FolkError::InvalidPayload(_)
                | FolkError::ConfigError(_)
        )
    }
}
