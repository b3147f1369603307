//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the storage traits.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{QuoteRepository, QuoteStore, StorageError, StorageResult};
use crate::storage::{InsertOutcome, QuoteRecord, StoredQuote};
use crate::HarvestError;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates a writable database and ensures the schema exists
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(HarvestError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, HarvestError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened database at {}", path.display());

        Ok(Self { conn })
    }

    /// Opens an existing database without write access
    ///
    /// The schema is not created or checked here; a missing table surfaces
    /// as an error on the first query.
    pub fn open_read_only(path: &Path) -> Result<Self, HarvestError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        tracing::debug!("Opened database read-only at {}", path.display());

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, HarvestError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Closes the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> StorageResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| StorageError::Close(e.to_string()))
    }
}

impl QuoteStore for SqliteStorage {
    fn insert_quote(&mut self, record: &QuoteRecord) -> StorageResult<InsertOutcome> {
        let changed = self.conn.execute(
            "INSERT INTO quotes (quote, author, tags, author_profile) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(quote) DO NOTHING",
            params![
                record.text,
                record.author,
                record.tags,
                record.author_profile
            ],
        )?;

        if changed == 0 {
            Ok(InsertOutcome::DuplicateSkipped)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    fn count_quotes(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl QuoteRepository for SqliteStorage {
    fn list_all(&self) -> StorageResult<Vec<StoredQuote>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, quote, author, tags, author_profile FROM quotes ORDER BY id")?;

        let quotes = stmt
            .query_map([], |row| {
                Ok(StoredQuote {
                    id: row.get(0)?,
                    quote: row.get(1)?,
                    author: row.get(2)?,
                    tags: row.get(3)?,
                    author_profile: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quotes)
    }
}
