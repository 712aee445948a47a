//! Deterministic embedders.

use async_trait::async_trait;
use deskpilot_memory::{Embedder, EmbeddingError};

/// One vector axis per keyword; each component counts occurrences.
///
/// Texts sharing keywords land close together under L2 distance, which makes
/// similarity ranking fully predictable in tests.
pub struct KeywordEmbedder {
    keywords: Vec<String>,
}

impl KeywordEmbedder {
    /// Build an embedder with one dimension per keyword.
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|word| word.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    fn dim(&self) -> usize {
        self.keywords.len()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let lowered = text.to_lowercase();
        Ok(self
            .keywords
            .iter()
            .map(|keyword| lowered.matches(keyword.as_str()).count() as f32)
            .collect())
    }
}

/// Always fails, for degraded-path tests.
pub struct FailingEmbedder {
    dim: usize,
}

impl FailingEmbedder {
    /// Build a failing embedder claiming the given width.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

#[async_trait]
impl Embedder for FailingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::new("backend offline"))
    }
}
