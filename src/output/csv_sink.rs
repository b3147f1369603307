//! CSV export of extracted records

use crate::storage::QuoteRecord;
use crate::HarvestError;
use std::path::Path;

/// Header row, in column order
pub const CSV_HEADER: [&str; 4] = ["text", "attribution", "tags", "profile_path"];

/// Writes all records to a CSV file, replacing any previous content
///
/// The header row is always written, even when there are no records.
///
/// # Arguments
///
/// * `path` - Destination file; parent directories are created if missing
/// * `records` - Records in extraction order
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written
/// * `Err(HarvestError)` - Failed to create or write the file
pub fn write_records_csv(path: &Path, records: &[QuoteRecord]) -> Result<usize, HarvestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}
