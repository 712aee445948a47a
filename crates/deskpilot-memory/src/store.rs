//! Vector store interface and the SQLite + sqlite-vec implementation.

use crate::error::MemoryError;
use crate::model::{MemoryEntry, MemoryTable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

/// Store abstraction used by the orchestrator and the memory tools.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Append one entry to a table. Existing rows are never touched.
    async fn write(&self, table: MemoryTable, entry: MemoryEntry) -> Result<(), MemoryError>;

    /// Return the single nearest `context` entry by vector distance, or
    /// `None` when the table is empty.
    async fn nearest_context(&self, query: &[f32]) -> Result<Option<MemoryEntry>, MemoryError>;

    /// Row count for a table.
    async fn count(&self, table: MemoryTable) -> Result<usize, MemoryError>;

    /// Configured embedding width of the index.
    fn dim(&self) -> usize;
}

/// Register the sqlite-vec extension globally (once).
///
/// Must run before any `Connection::open()` that needs vec0 support.
fn ensure_sqlite_vec_loaded() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // SAFETY: `sqlite3_vec_init` is a valid SQLite extension entry point
        // provided by the sqlite-vec crate (statically linked). Registering
        // it as an auto-extension is the documented way to enable vec0 for
        // all connections.
        unsafe {
            type ExtEntryPoint = unsafe extern "C" fn(
                *mut rusqlite::ffi::sqlite3,
                *mut *mut i8,
                *const rusqlite::ffi::sqlite3_api_routines,
            ) -> i32;

            rusqlite::ffi::sqlite3_auto_extension(Some(std::mem::transmute::<
                *const (),
                ExtEntryPoint,
            >(
                sqlite_vec::sqlite3_vec_init as *const (),
            )));
        }
    });
}

/// SQLite-backed append-only vector store.
///
/// Thread-safe via an internal `Mutex<Connection>`; all access is serialized,
/// which matches the single-run cooperative model of the core.
pub struct SqliteVectorStore {
    path: PathBuf,
    dim: usize,
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteVectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteVectorStore")
            .field("path", &self.path)
            .field("dim", &self.dim)
            .finish_non_exhaustive()
    }
}

impl SqliteVectorStore {
    /// Open (or create) the database and apply the vec0 schema.
    pub fn open(path: impl AsRef<Path>, dim: usize) -> Result<Self, MemoryError> {
        ensure_sqlite_vec_loaded();

        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        apply_schema(&conn, dim)?;
        info!(
            "opened vector store (path={}, dim={})",
            path.display(),
            dim
        );
        Ok(Self {
            path,
            dim,
            conn: Mutex::new(conn),
        })
    }

    /// Database file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_dim(&self, entry: &MemoryEntry) -> Result<(), MemoryError> {
        if entry.embedding.len() != self.dim {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dim,
                got: entry.embedding.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    /// Append one row; the write fails if the vector width is wrong.
    async fn write(&self, table: MemoryTable, entry: MemoryEntry) -> Result<(), MemoryError> {
        self.check_dim(&entry)?;
        let categories = match &entry.categories {
            Some(categories) => Some(serde_json::to_string(categories)?),
            None => None,
        };
        let sql = format!(
            "INSERT INTO {}(creation_date, content, categories, embedding) VALUES (?1, ?2, ?3, ?4)",
            table.name()
        );
        let conn = self.conn.lock();
        conn.execute(
            &sql,
            params![
                entry.creation_date.to_rfc3339(),
                entry.text,
                categories,
                vector_to_blob(&entry.embedding),
            ],
        )?;
        debug!(
            "stored memory entry (table={}, text_len={})",
            table.name(),
            entry.text.len()
        );
        Ok(())
    }

    /// Top-1 nearest-neighbor lookup over the `context` table.
    async fn nearest_context(&self, query: &[f32]) -> Result<Option<MemoryEntry>, MemoryError> {
        if query.len() != self.dim {
            return Err(MemoryError::DimensionMismatch {
                expected: self.dim,
                got: query.len(),
            });
        }
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT creation_date, content, categories, embedding \
             FROM context WHERE embedding MATCH ?1 AND k = 1 ORDER BY distance",
        )?;
        let mut rows = stmt.query(params![vector_to_blob(query)])?;
        let Some(row) = rows.next()? else {
            debug!("nearest context lookup on empty table");
            return Ok(None);
        };
        let creation_date: String = row.get(0)?;
        let text: String = row.get(1)?;
        let categories: Option<String> = row.get(2)?;
        let embedding: Vec<u8> = row.get(3)?;
        let categories = match categories {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };
        Ok(Some(MemoryEntry {
            creation_date: parse_creation_date(&creation_date),
            text,
            categories,
            embedding: blob_to_vector(&embedding),
        }))
    }

    /// Row count for a table.
    async fn count(&self, table: MemoryTable) -> Result<usize, MemoryError> {
        let sql = format!("SELECT count(*) FROM {}", table.name());
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

/// Create the three append-only tables if they do not exist.
fn apply_schema(conn: &Connection, dim: usize) -> Result<(), MemoryError> {
    for table in ["flows", "context", "prompts"] {
        conn.execute_batch(&format!(
            "CREATE VIRTUAL TABLE IF NOT EXISTS {table} USING vec0(
                embedding float[{dim}],
                +creation_date TEXT,
                +content TEXT,
                +categories TEXT
            )"
        ))?;
    }
    Ok(())
}

/// Encode an f32 vector as the little-endian blob sqlite-vec expects.
fn vector_to_blob(vector: &[f32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

/// Decode a little-endian blob back into an f32 vector.
fn blob_to_vector(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Parse a stored RFC 3339 timestamp, falling back to the epoch on damage.
fn parse_creation_date(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .unwrap_or_default()
}
