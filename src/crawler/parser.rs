//! HTML parser for extracting quotations and the next-page link
//!
//! The markup is expected to be fixed:
//! - one `div.quote` block per quotation
//! - `span.text` and `small.author` inside each block
//! - zero or more `a.tag` labels
//! - the first `<a>` of the block links to the author's profile
//! - an optional `li.next > a` in the pager
//!
//! Missing required pieces are reported as errors rather than skipped.

use crate::storage::QuoteRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Separator used when joining tag labels
pub const TAG_SEPARATOR: &str = ", ";

/// Extracted information from one listing page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Quotations in page order
    pub records: Vec<QuoteRecord>,

    /// Absolute address of the next page, if the pager has one
    pub next_page: Option<Url>,
}

/// Parses a listing page
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `origin` - Site origin used to resolve the next-page link
///
/// # Returns
///
/// * `Ok(ParsedPage)` - Records plus the optional next link
/// * `Err(String)` - The page does not have the expected shape
///
/// # Example
///
/// ```
/// use quotes_harvest::crawler::parse_quotes_page;
/// use url::Url;
///
/// let html = r#"<div class="quote">
///     <span class="text">Hello.</span>
///     <small class="author">Jane Doe</small>
///     <a href="/author/Jane-Doe">(about)</a>
/// </div>"#;
/// let origin = Url::parse("https://example.com").unwrap();
/// let parsed = parse_quotes_page(html, &origin).unwrap();
/// assert_eq!(parsed.records[0].author, "Jane Doe");
/// assert!(parsed.next_page.is_none());
/// ```
pub fn parse_quotes_page(html: &str, origin: &Url) -> Result<ParsedPage, String> {
    let document = Html::parse_document(html);

    let records = extract_records(&document)?;
    let next_page = extract_next_page(&document, origin)?;

    Ok(ParsedPage { records, next_page })
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}

/// Extracts one record per `div.quote` block
fn extract_records(document: &Html) -> Result<Vec<QuoteRecord>, String> {
    let block_selector = selector("div.quote")?;
    let text_selector = selector("span.text")?;
    let author_selector = selector("small.author")?;
    let tag_selector = selector("a.tag")?;
    let anchor_selector = selector("a")?;

    let mut records = Vec::new();

    for (index, block) in document.select(&block_selector).enumerate() {
        let position = index + 1;

        let text = block
            .select(&text_selector)
            .next()
            .map(element_text)
            .ok_or_else(|| format!("quote #{} has no span.text", position))?;

        let author = block
            .select(&author_selector)
            .next()
            .map(element_text)
            .ok_or_else(|| format!("quote #{} has no small.author", position))?;

        let tags = block
            .select(&tag_selector)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR);

        let author_profile = block
            .select(&anchor_selector)
            .next()
            .ok_or_else(|| format!("quote #{} has no author link", position))?
            .value()
            .attr("href")
            .ok_or_else(|| format!("quote #{} author link has no href", position))?
            .trim()
            .to_string();

        records.push(QuoteRecord {
            text,
            author,
            tags,
            author_profile,
        });
    }

    Ok(records)
}

/// Finds the pager's next link and resolves it against the origin
///
/// Absence of `li.next` means this is the last page. An `li.next` without a
/// usable link is a shape error.
fn extract_next_page(document: &Html, origin: &Url) -> Result<Option<Url>, String> {
    let next_selector = selector("li.next")?;
    let anchor_selector = selector("a")?;

    let Some(next) = document.select(&next_selector).next() else {
        return Ok(None);
    };

    let href = next
        .select(&anchor_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or_else(|| "li.next has no link".to_string())?;

    origin
        .join(href)
        .map(Some)
        .map_err(|e| format!("next link '{}' does not resolve: {}", href, e))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
