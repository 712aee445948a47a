//! Text embedding seam.

use async_trait::async_trait;
use thiserror::Error;

/// The embedding backend rejected or failed the request.
#[derive(Debug, Clone, Error)]
#[error("embedding failed: {0}")]
pub struct EmbeddingError(pub String);

impl EmbeddingError {
    /// Build an embedding error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Turns free text into a fixed-width vector for memory indexing.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Width of the produced vectors.
    fn dim(&self) -> usize;

    /// Embed one text into a vector of `dim()` components.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
