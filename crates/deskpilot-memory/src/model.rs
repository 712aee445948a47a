//! Persisted entry model used by vector stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryTable {
    /// Pre-defined workflow descriptions; reserved, never written by the core.
    Flows,
    /// Facts the model chose to store.
    Context,
    /// Auto-logged user utterances.
    Prompts,
}

impl MemoryTable {
    /// SQL table name for this selector.
    pub fn name(&self) -> &'static str {
        match self {
            MemoryTable::Flows => "flows",
            MemoryTable::Context => "context",
            MemoryTable::Prompts => "prompts",
        }
    }
}

/// One row of embedding-indexed memory.
///
/// Entries are never mutated or deleted after they are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryEntry {
    /// Timestamp the entry was created at.
    pub creation_date: DateTime<Utc>,
    /// Free-form entry text.
    pub text: String,
    /// Optional category labels, preserved in write order.
    pub categories: Option<Vec<String>>,
    /// Fixed-width embedding vector; must match the index width.
    pub embedding: Vec<f32>,
}

impl MemoryEntry {
    /// Build an entry stamped with the current time.
    pub fn new(text: impl Into<String>, categories: Option<Vec<String>>, embedding: Vec<f32>) -> Self {
        Self {
            creation_date: Utc::now(),
            text: text.into(),
            categories,
            embedding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryTable;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_names_match_the_on_disk_layout() {
        assert_eq!(MemoryTable::Flows.name(), "flows");
        assert_eq!(MemoryTable::Context.name(), "context");
        assert_eq!(MemoryTable::Prompts.name(), "prompts");
    }
}
