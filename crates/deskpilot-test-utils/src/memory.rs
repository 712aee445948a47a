//! In-memory vector store with exact nearest-neighbor lookup.

use async_trait::async_trait;
use deskpilot_memory::{MemoryEntry, MemoryError, MemoryTable, VectorStore};
use parking_lot::Mutex;

/// Exact in-memory stand-in for the SQLite store.
pub struct InMemoryVectorStore {
    dim: usize,
    flows: Mutex<Vec<MemoryEntry>>,
    context: Mutex<Vec<MemoryEntry>>,
    prompts: Mutex<Vec<MemoryEntry>>,
}

impl InMemoryVectorStore {
    /// Build an empty store for the given embedding width.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            flows: Mutex::new(Vec::new()),
            context: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of a table's entries, in write order.
    pub fn entries(&self, table: MemoryTable) -> Vec<MemoryEntry> {
        self.table(table).lock().clone()
    }

    fn table(&self, table: MemoryTable) -> &Mutex<Vec<MemoryEntry>> {
        match table {
            MemoryTable::Flows => &self.flows,
            MemoryTable::Context => &self.context,
            MemoryTable::Prompts => &self.prompts,
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn write(&self, table: MemoryTable, entry: MemoryEntry) -> Result<(), MemoryError> {
        if entry.embedding.len() != self.dim {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dim,
                got: entry.embedding.len(),
            });
        }
        self.table(table).lock().push(entry);
        Ok(())
    }

    async fn nearest_context(&self, query: &[f32]) -> Result<Option<MemoryEntry>, MemoryError> {
        let rows = self.context.lock();
        let mut best: Option<(f32, &MemoryEntry)> = None;
        for row in rows.iter() {
            let distance: f32 = row
                .embedding
                .iter()
                .zip(query)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, row));
            }
        }
        Ok(best.map(|(_, row)| row.clone()))
    }

    async fn count(&self, table: MemoryTable) -> Result<usize, MemoryError> {
        Ok(self.table(table).lock().len())
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
