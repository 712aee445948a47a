//! Error types for memory operations.

/// Errors returned by vector stores.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// IO error while preparing the database location.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error for auxiliary columns.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Embedding width does not match the configured index width.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
