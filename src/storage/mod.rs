//! Storage module for persisting quotations
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Duplicate-aware inserts keyed on the quote text
//! - Read-only listing for the presenter

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStorage;
pub use traits::{QuoteRepository, QuoteStore, StorageError, StorageResult};

use crate::HarvestError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opens (creating if needed) the writable store at `path`
pub fn open_storage(path: &Path) -> Result<SqliteStorage, HarvestError> {
    SqliteStorage::new(path)
}

/// One extracted quotation
///
/// Field names on the wire follow the CSV header
/// `text,attribution,tags,profile_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub text: String,

    #[serde(rename = "attribution")]
    pub author: String,

    /// Tag labels joined with `", "`; empty when the quote has none
    pub tags: String,

    /// Relative link such as `/author/Albert-Einstein`
    #[serde(rename = "profile_path")]
    pub author_profile: String,
}

/// A row read back from the `quotes` table
///
/// The table may be filled by other tools, so every text column is nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuote {
    pub id: i64,
    pub quote: Option<String>,
    pub author: Option<String>,
    pub tags: Option<String>,
    pub author_profile: Option<String>,
}

/// Result of a single insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateSkipped,
}

/// Totals from a batch insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub saved: u64,
    pub duplicates: u64,
}
