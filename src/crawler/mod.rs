//! Crawler module for page fetching and quotation extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching (one GET per page, no retry)
//! - HTML parsing of quotation blocks and the pager
//! - The budgeted next-page loop and the persistence that follows it

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, Harvest};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::{parse_quotes_page, ParsedPage, TAG_SEPARATOR};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the database
/// 2. Fetch pages from the seed, following next links within the page budget
/// 3. Write every record to the CSV file
/// 4. Insert every record into the database, counting duplicates
/// 5. Close the database and return the report
pub async fn crawl(config: Config) -> Result<CrawlReport, HarvestError> {
    run_crawl(config).await
}
