//! Presentation layer over stored quotations
//!
//! Reads rows through a [`QuoteRepository`] and shapes them for display:
//! - the comma-joined tag string becomes a list of labels
//! - the relative profile path becomes an absolute link on the site origin
//!
//! No filtering, sorting, or paging is applied; the listing is every stored
//! row plus its count.

mod render;

pub use render::{export_listing, render_json, render_markdown, render_text, ListingFormat};

use crate::storage::{QuoteRepository, SqliteStorage, StoredQuote};
use crate::HarvestError;
use serde::Serialize;
use std::path::Path;

/// One quotation shaped for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteView {
    pub quote: String,
    pub author: String,
    pub tags: Vec<String>,
    /// Absolute link to the author's profile
    pub author_profile: String,
}

/// Full listing handed to a renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuoteListing {
    pub quotes: Vec<QuoteView>,
    pub total_quotes: usize,
}

/// Splits a stored tag string into labels
///
/// Splits on commas, trims each piece, and drops empty pieces. Order is kept.
///
/// ```
/// use quotes_harvest::presenter::split_tags;
///
/// assert_eq!(split_tags(Some("a, b, c")), vec!["a", "b", "c"]);
/// assert!(split_tags(Some("")).is_empty());
/// assert!(split_tags(None).is_empty());
/// ```
pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Joins a relative profile path onto the site origin
///
/// An empty path gives the origin itself.
///
/// ```
/// use quotes_harvest::presenter::absolute_profile_url;
///
/// assert_eq!(
///     absolute_profile_url("https://example.com", "/author/Jane-Doe/"),
///     "https://example.com/author/Jane-Doe/"
/// );
/// ```
pub fn absolute_profile_url(origin: &str, profile_path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if profile_path.is_empty() {
        origin.to_string()
    } else if profile_path.starts_with('/') {
        format!("{}{}", origin, profile_path)
    } else {
        format!("{}/{}", origin, profile_path)
    }
}

impl QuoteView {
    /// Shapes a stored row for display
    ///
    /// NULL text columns are shown as empty strings.
    pub fn from_stored(row: StoredQuote, origin: &str) -> Self {
        Self {
            tags: split_tags(row.tags.as_deref()),
            author_profile: absolute_profile_url(
                origin,
                row.author_profile.as_deref().unwrap_or_default(),
            ),
            quote: row.quote.unwrap_or_default(),
            author: row.author.unwrap_or_default(),
        }
    }
}

/// Builds the listing from every stored row
///
/// An empty store gives an empty listing with a count of zero.
pub fn build_listing(
    repository: &dyn QuoteRepository,
    origin: &str,
) -> Result<QuoteListing, HarvestError> {
    let quotes: Vec<QuoteView> = repository
        .list_all()?
        .into_iter()
        .map(|row| QuoteView::from_stored(row, origin))
        .collect();

    tracing::debug!("Built listing with {} quotes", quotes.len());

    Ok(QuoteListing {
        total_quotes: quotes.len(),
        quotes,
    })
}

/// Opens the database read-only and builds the listing
pub fn load_listing(database_path: &Path, origin: &str) -> Result<QuoteListing, HarvestError> {
    let repository = SqliteStorage::open_read_only(database_path)?;
    let listing = build_listing(&repository, origin)?;
    repository.close()?;
    Ok(listing)
}
