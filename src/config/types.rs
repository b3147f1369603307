use serde::Deserialize;

/// Default site origin
pub const DEFAULT_ORIGIN: &str = "https://quotes.toscrape.com";

/// Default first page of the crawl
pub const DEFAULT_SEED_URL: &str = "https://quotes.toscrape.com/page/1/";

/// Default maximum number of page fetches
pub const DEFAULT_PAGE_BUDGET: u32 = 10;

/// Main configuration structure for Quotes-Harvest
///
/// Built once at process start and never mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Scheme and host used to resolve next-page links and profile links
    #[serde(default = "default_origin")]
    pub origin: String,

    /// First page fetched by the crawl loop
    #[serde(rename = "seed-url", default = "default_seed_url")]
    pub seed_url: String,

    /// Maximum number of page fetches
    #[serde(rename = "page-budget", default = "default_page_budget")]
    pub page_budget: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            seed_url: default_seed_url(),
            page_budget: DEFAULT_PAGE_BUDGET,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV file, overwritten on every run
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Path to the exported markdown listing
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            database_path: default_database_path(),
            listing_path: default_listing_path(),
        }
    }
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

fn default_seed_url() -> String {
    DEFAULT_SEED_URL.to_string()
}

fn default_page_budget() -> u32 {
    DEFAULT_PAGE_BUDGET
}

fn default_csv_path() -> String {
    "quotes.csv".to_string()
}

fn default_database_path() -> String {
    "quotes.db".to_string()
}

fn default_listing_path() -> String {
    "quotes.md".to_string()
}
