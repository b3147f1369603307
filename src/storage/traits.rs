//! Storage traits and error types
//!
//! Writing and reading are split into two traits: the crawler only needs
//! [`QuoteStore`], the presenter only gets [`QuoteRepository`].

use crate::storage::{InsertOutcome, QuoteRecord, SaveSummary, StoredQuote};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to close database: {0}")]
    Close(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Write side of the quotation store
pub trait QuoteStore {
    /// Inserts a single record
    ///
    /// A record whose text is already stored is left untouched and reported
    /// as [`InsertOutcome::DuplicateSkipped`]; it is not an error.
    fn insert_quote(&mut self, record: &QuoteRecord) -> StorageResult<InsertOutcome>;

    /// Counts stored rows
    fn count_quotes(&self) -> StorageResult<u64>;

    /// Inserts every record in order and tallies the outcomes
    fn save_quotes(&mut self, records: &[QuoteRecord]) -> StorageResult<SaveSummary> {
        let mut summary = SaveSummary::default();

        for record in records {
            match self.insert_quote(record)? {
                InsertOutcome::Inserted => summary.saved += 1,
                InsertOutcome::DuplicateSkipped => {
                    tracing::debug!("Duplicate quote skipped: {}", record.text);
                    summary.duplicates += 1;
                }
            }
        }

        Ok(summary)
    }
}

/// Read-only view over stored quotations
///
/// The schema behind this trait is owned by the writer; implementations must
/// not create or migrate tables.
pub trait QuoteRepository {
    /// Returns every stored row in insertion order
    fn list_all(&self) -> StorageResult<Vec<StoredQuote>>;
}
