//! Quotes-Harvest main entry point
//!
//! This is the command-line interface for the Quotes-Harvest crawler and
//! its listing views.

use anyhow::Context;
use clap::Parser;
use quotes_harvest::config::{load_config_with_hash, validate, Config};
use quotes_harvest::crawler::crawl;
use quotes_harvest::output::print_report;
use quotes_harvest::presenter::{
    export_listing, load_listing, render_json, render_text, ListingFormat,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quotes-Harvest: a paginated quotation crawler
///
/// Crawls the quotation site page by page, writes every quotation to a CSV
/// file and a SQLite database, and lists what the database holds.
#[derive(Parser, Debug)]
#[command(name = "quotes-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A paginated quotation crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to fetch, overriding the config file
    #[arg(short, long, value_name = "N")]
    pages: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["list", "export_listing"])]
    dry_run: bool,

    /// Print the stored quotations and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_listing"])]
    list: bool,

    /// Print the listing as JSON instead of text (with --list)
    #[arg(long, requires = "list")]
    json: bool,

    /// Write the markdown listing to the configured listing path and exit
    #[arg(long, conflicts_with_all = ["dry_run", "list"])]
    export_listing: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.list {
        handle_list(&config, cli.json)?;
    } else if cli.export_listing {
        handle_export_listing(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quotes_harvest=info,warn"),
            1 => EnvFilter::new("quotes_harvest=debug,info"),
            2 => EnvFilter::new("quotes_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the run configuration once; it is not modified afterwards
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("reading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(pages) = cli.pages {
        config.crawler.page_budget = pages;
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Quotes-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Origin: {}", config.crawler.origin);
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!("  Page budget: {}", config.crawler.page_budget);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Database: {}", config.output.database_path);
    println!("  Listing: {}", config.output.listing_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would fetch at most {} pages starting at {}",
        config.crawler.page_budget, config.crawler.seed_url
    );
}

/// Handles the --list mode: prints every stored quotation
fn handle_list(config: &Config, json: bool) -> anyhow::Result<()> {
    let listing = load_listing(
        Path::new(&config.output.database_path),
        &config.crawler.origin,
    )
    .with_context(|| format!("listing {}", config.output.database_path))?;

    if json {
        println!("{}", render_json(&listing)?);
    } else {
        print!("{}", render_text(&listing));
    }

    Ok(())
}

/// Handles the --export-listing mode: writes the markdown listing
fn handle_export_listing(config: &Config) -> anyhow::Result<()> {
    println!("=== Exporting Quote Listing ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.listing_path);
    println!();

    let listing = load_listing(
        Path::new(&config.output.database_path),
        &config.crawler.origin,
    )
    .with_context(|| format!("listing {}", config.output.database_path))?;

    tracing::info!("Rendering {} quotes...", listing.total_quotes);
    export_listing(
        &listing,
        Path::new(&config.output.listing_path),
        ListingFormat::Markdown,
    )?;

    println!("✓ Listing exported to: {}", config.output.listing_path);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl at {} (page budget {})",
        config.crawler.seed_url,
        config.crawler.page_budget
    );

    match crawl(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
