//! Output module for crawl results
//!
//! This module handles:
//! - Writing extracted records to the CSV file
//! - Formatting the end-of-run report

mod csv_sink;
mod report;

pub use csv_sink::{write_records_csv, CSV_HEADER};
pub use report::{format_report, print_report, CrawlReport};
