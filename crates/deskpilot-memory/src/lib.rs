//! Embedding-indexed memory for Deskpilot.
//!
//! Free-text context and raw prompts are stored append-only in SQLite with a
//! fixed-width vector column; retrieval is a top-1 nearest-neighbor lookup.

pub mod embedder;
pub mod error;
pub mod model;
pub mod store;

/// Embedding seam used to index entries.
pub use embedder::{Embedder, EmbeddingError};
/// Memory error type.
pub use error::MemoryError;
/// Persisted entry model and table selector.
pub use model::{MemoryEntry, MemoryTable};
/// Store interface and the default SQLite implementation.
pub use store::{SqliteVectorStore, VectorStore};
