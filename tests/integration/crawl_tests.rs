//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small fixture site and run the full
//! crawl cycle end-to-end against it.

use quotes_harvest::config::{Config, CrawlerConfig, OutputConfig};
use quotes_harvest::crawler::{run_crawl, Coordinator};
use quotes_harvest::presenter::{build_listing, load_listing};
use quotes_harvest::storage::{QuoteRecord, QuoteStore, SqliteStorage};
use quotes_harvest::HarvestError;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(origin: &str, page_budget: u32, dir: &TempDir) -> Config {
    Config {
        crawler: CrawlerConfig {
            origin: origin.to_string(),
            seed_url: format!("{}/page/1/", origin),
            page_budget,
        },
        output: OutputConfig {
            csv_path: dir.path().join("quotes.csv").display().to_string(),
            database_path: dir.path().join("quotes.db").display().to_string(),
            listing_path: dir.path().join("quotes.md").display().to_string(),
        },
    }
}

/// Renders one quotation block the way the live site does
fn quote_block(text: &str, author: &str, tags: &[&str]) -> String {
    let slug = author.replace(' ', "-");
    let tag_links: String = tags
        .iter()
        .map(|t| format!(r#"<a class="tag" href="/tag/{}/page/1/">{}</a>"#, t, t))
        .collect();

    format!(
        r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
            <span class="text" itemprop="text">{}</span>
            <span>by <small class="author" itemprop="author">{}</small>
            <a href="/author/{}">(about)</a></span>
            <div class="tags">Tags: {}</div>
        </div>"#,
        text, author, slug, tag_links
    )
}

/// Renders a full listing page with an optional next link
fn listing_page(blocks: &[String], next: Option<&str>) -> String {
    let pager = match next {
        Some(href) => format!(
            r#"<li class="next"><a href="{}">Next <span aria-hidden="true">&rarr;</span></a></li>"#,
            href
        ),
        None => String::new(),
    };

    format!(
        r#"<html><head><title>Quotes to Scrape</title></head><body>
        <div class="container"><div class="row"><div class="col-md-8">
        {}
        <nav><ul class="pager">{}</ul></nav>
        </div></div></div></body></html>"#,
        blocks.join("\n"),
        pager
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Page 1: two quotes and a next link. Page 2: one quote, no next link.
async fn mount_two_page_site(server: &MockServer) {
    mount_page(
        server,
        "/page/1/",
        listing_page(
            &[
                quote_block("“First quote.”", "Albert Einstein", &["change", "world"]),
                quote_block("“Second quote.”", "Jane Austen", &["books"]),
            ],
            Some("/page/2/"),
        ),
    )
    .await;

    mount_page(
        server,
        "/page/2/",
        listing_page(
            &[quote_block("“Third quote.”", "Steve Martin", &[])],
            None,
        ),
    )
    .await;
}

fn csv_data_rows(path: &str) -> Vec<QuoteRecord> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    reader
        .deserialize()
        .collect::<Result<Vec<QuoteRecord>, _>>()
        .expect("Failed to read CSV rows")
}

#[tokio::test]
async fn test_two_page_site_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_two_page_site(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), 10, &dir);
    let db_path = config.output.database_path.clone();
    let csv_path = config.output.csv_path.clone();
    let origin = config.crawler.origin.clone();

    let report = run_crawl(config).await.expect("Crawl failed");

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.records_extracted, 3);
    assert_eq!(report.csv_rows, 3);
    assert_eq!(report.saved, 3);
    assert_eq!(report.duplicates, 0);

    // CSV rows match extracted records, in order
    let rows = csv_data_rows(&csv_path);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].text, "“First quote.”");
    assert_eq!(rows[0].tags, "change, world");
    assert_eq!(rows[2].author, "Steve Martin");
    assert_eq!(rows[2].tags, "");
    assert_eq!(rows[1].author_profile, "/author/Jane-Austen");

    // Presenter sees the same three rows
    let listing = load_listing(Path::new(&db_path), &origin).expect("Listing failed");
    assert_eq!(listing.total_quotes, 3);
    assert_eq!(listing.quotes[0].tags, vec!["change", "world"]);
    assert_eq!(
        listing.quotes[1].author_profile,
        format!("{}/author/Jane-Austen", origin)
    );
    assert!(listing.quotes[2].tags.is_empty());
}

#[tokio::test]
async fn test_second_run_counts_duplicates() {
    let mock_server = MockServer::start().await;
    mount_two_page_site(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), 10, &dir);
    let db_path = config.output.database_path.clone();
    let csv_path = config.output.csv_path.clone();

    run_crawl(config.clone()).await.expect("First crawl failed");
    let report = run_crawl(config).await.expect("Second crawl failed");

    assert_eq!(report.saved, 0);
    assert_eq!(report.duplicates, 3);

    // CSV is overwritten, not appended
    assert_eq!(csv_data_rows(&csv_path).len(), 3);

    let storage = SqliteStorage::new(Path::new(&db_path)).expect("Failed to open DB");
    assert_eq!(storage.count_quotes().unwrap(), 3);
}

#[tokio::test]
async fn test_page_budget_bounds_fetches() {
    let mock_server = MockServer::start().await;

    // Every page links to another page
    for n in 1..=3 {
        mount_page(
            &mock_server,
            &format!("/page/{}/", n),
            listing_page(
                &[quote_block(&format!("“Quote {}.”", n), "Jane Doe", &[])],
                Some(format!("/page/{}/", n + 1).as_str()),
            ),
        )
        .await;
    }

    // Beyond the budget: must never be requested
    Mock::given(method("GET"))
        .and(path("/page/4/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), 3, &dir);

    let harvest = Coordinator::new(config)
        .unwrap()
        .collect()
        .await
        .expect("Crawl failed");

    assert_eq!(harvest.pages_fetched, 3);
    assert_eq!(harvest.records.len(), 3);
    assert!(!harvest.reached_last_page);
}

#[tokio::test]
async fn test_stops_at_first_page_without_next() {
    let mock_server = MockServer::start().await;
    mount_two_page_site(&mock_server).await;

    // Exists, but page 2 never links to it
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), 10, &dir);

    let harvest = Coordinator::new(config)
        .unwrap()
        .collect()
        .await
        .expect("Crawl failed");

    assert_eq!(harvest.pages_fetched, 2);
    assert_eq!(harvest.records.len(), 3);
    assert!(harvest.reached_last_page);
}

#[tokio::test]
async fn test_http_error_aborts_run() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/page/1/",
        listing_page(
            &[quote_block("“Only.”", "Jane Doe", &[])],
            Some("/page/2/"),
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), 10, &dir);
    let csv_path = config.output.csv_path.clone();

    let result = run_crawl(config).await;

    assert!(matches!(
        result,
        Err(HarvestError::HttpStatus { status: 500, .. })
    ));
    // Nothing is written when the loop aborts
    assert!(!Path::new(&csv_path).exists());
}

#[tokio::test]
async fn test_malformed_markup_aborts_run() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/page/1/",
        r#"<html><body><div class="quote"><span class="text">No author.</span></div></body></html>"#
            .to_string(),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&mock_server.uri(), 10, &dir);

    let result = run_crawl(config).await;

    assert!(matches!(result, Err(HarvestError::Markup { .. })));
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("quotes.db");

    // Writer creates the schema, reader only reads it
    SqliteStorage::new(&db_path).unwrap().close().unwrap();

    let reader = SqliteStorage::open_read_only(&db_path).unwrap();
    let listing = build_listing(&reader, "https://example.com").unwrap();

    assert_eq!(listing.total_quotes, 0);
    assert!(listing.quotes.is_empty());
}

#[test]
fn test_listing_tolerates_null_columns() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("quotes.db");

    // Rows written by another tool may leave columns NULL
    SqliteStorage::new(&db_path).unwrap().close().unwrap();
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "INSERT INTO quotes (quote, author, tags, author_profile) VALUES ('Q', NULL, 'a', '/author/A');
         INSERT INTO quotes (quote, author, tags, author_profile) VALUES ('R', 'B', 'b', '/author/B');",
    )
    .unwrap();
    drop(conn);

    let listing = load_listing(&db_path, "https://example.com").expect("Listing failed");

    assert_eq!(listing.total_quotes, 2);
    assert_eq!(listing.quotes[0].author, "");
    assert_eq!(
        listing.quotes[0].author_profile,
        "https://example.com/author/A"
    );
    assert_eq!(listing.quotes[1].author, "B");
}
