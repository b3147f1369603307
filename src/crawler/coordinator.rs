//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop and the persistence step that follows
//! it:
//! - Following next-page links from the seed within the page budget
//! - Collecting every extracted record in order
//! - Writing the CSV file and inserting into the database
//! - Producing the run report

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_quotes_page;
use crate::output::{write_records_csv, CrawlReport};
use crate::storage::{open_storage, QuoteRecord, QuoteStore};
use crate::HarvestError;
use reqwest::Client;
use std::path::Path;
use std::time::Instant;
use url::Url;

/// Everything the page loop produced
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    /// Records from all fetched pages, in fetch order
    pub records: Vec<QuoteRecord>,

    /// Number of pages fetched
    pub pages_fetched: u32,

    /// True when the loop stopped because a page had no next link
    pub reached_last_page: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    origin: Url,
    seed: Url,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration, fixed for the rest of the run
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Bad origin/seed URL or HTTP client failure
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let origin = Url::parse(&config.crawler.origin)?;
        let seed = Url::parse(&config.crawler.seed_url)?;
        let client = build_http_client()?;

        Ok(Self {
            config,
            client,
            origin,
            seed,
        })
    }

    /// Runs the page loop only
    ///
    /// Fetches at most `page-budget` pages, starting at the seed and
    /// following next links. Stops early on the first page without one.
    /// Any fetch or markup failure aborts the loop and discards what was
    /// collected so far.
    pub async fn collect(&self) -> Result<Harvest, HarvestError> {
        let budget = self.config.crawler.page_budget;
        let mut harvest = Harvest::default();
        let mut url = self.seed.clone();

        for page_number in 1..=budget {
            tracing::info!("Scraping page {}...", page_number);
            tracing::debug!("Fetching {}", url);

            let page = fetch_page(&self.client, &url).await?;
            harvest.pages_fetched += 1;

            let parsed =
                parse_quotes_page(&page.body, &self.origin).map_err(|message| {
                    HarvestError::Markup {
                        url: url.to_string(),
                        message,
                    }
                })?;

            tracing::debug!(
                "Extracted {} quotes from {} (status {})",
                parsed.records.len(),
                page.final_url,
                page.status_code
            );
            harvest.records.extend(parsed.records);

            match parsed.next_page {
                Some(next) => url = next,
                None => {
                    tracing::info!("No more pages. Scraped {} pages total.", page_number);
                    harvest.reached_last_page = true;
                    break;
                }
            }
        }

        if !harvest.reached_last_page {
            tracing::info!("Page budget of {} exhausted", budget);
        }

        Ok(harvest)
    }

    /// Runs the full crawl: page loop, CSV file, database
    ///
    /// The database connection is opened before the first fetch, held for
    /// the whole run, and closed explicitly at the end.
    pub async fn run(&self) -> Result<CrawlReport, HarvestError> {
        let start_time = Instant::now();
        let csv_path = Path::new(&self.config.output.csv_path);
        let database_path = Path::new(&self.config.output.database_path);

        tracing::info!("CSV file: {}", csv_path.display());
        tracing::info!("Database file: {}", database_path.display());

        let mut storage = open_storage(database_path)?;

        let harvest = self.collect().await?;

        let csv_rows = write_records_csv(csv_path, &harvest.records)?;
        tracing::info!("Saved {} quotes to {}", csv_rows, csv_path.display());

        let summary = storage.save_quotes(&harvest.records)?;
        tracing::info!(
            "Saved {} quotes to database ({} skipped as duplicates)",
            summary.saved,
            summary.duplicates
        );

        storage.close()?;

        tracing::info!(
            "Crawl completed: {} pages fetched in {:?}",
            harvest.pages_fetched,
            start_time.elapsed()
        );

        Ok(CrawlReport {
            pages_fetched: harvest.pages_fetched,
            records_extracted: harvest.records.len(),
            csv_rows,
            saved: summary.saved,
            duplicates: summary.duplicates,
            csv_path: self.config.output.csv_path.clone(),
            database_path: self.config.output.database_path.clone(),
        })
    }
}

/// Runs the main crawl operation
///
/// # Example
///
/// ```no_run
/// use quotes_harvest::config::Config;
/// use quotes_harvest::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("{} quotes scraped", report.records_extracted);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
