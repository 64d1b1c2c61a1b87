//! Error types for msm-db

use thiserror::Error;

/// Data store operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Operation attempted before connect (D002)
    #[error("[D002] Database not connected")]
    NotConnected,

    /// Store rejected an operation (D003)
    #[error("[D003] {operation} failed on '{collection}': {message}")]
    Operation {
        operation: &'static str,
        collection: String,
        message: String,
    },

    /// JSON value cannot be turned into a stored document (D004)
    #[error("[D004] Invalid document: {0}")]
    InvalidDocument(String),

    /// Mutex poisoned (D005)
    #[error("[D005] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

impl DbError {
    pub(crate) fn operation(
        operation: &'static str,
        collection: &str,
        err: impl std::fmt::Display,
    ) -> Self {
        DbError::Operation {
            operation,
            collection: collection.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
