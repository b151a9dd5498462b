use thiserror::Error;

use crate::page::PageRequestError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },
    #[error("{entity} already exists: {key}")]
    AlreadyExists { entity: String, key: String },
    #[error("Scan is not enabled for {operation}")]
    ScanNotEnabled { operation: &'static str },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Invalid page request: {0}")]
    InvalidPage(#[from] PageRequestError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
