//! Listing renderers
//!
//! Plain text for the console, Markdown for an exported page, and JSON for
//! anything downstream that wants the raw listing.

use crate::presenter::QuoteListing;
use crate::HarvestError;
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output formats for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    Text,
    Markdown,
    Json,
}

/// Renders the listing as plain text
pub fn render_text(listing: &QuoteListing) -> String {
    let mut out = String::new();

    out.push_str(&format!("Total quotes: {}\n", listing.total_quotes));

    for (index, quote) in listing.quotes.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{}. {}\n", index + 1, quote.quote));
        out.push_str(&format!(
            "   by {} <{}>\n",
            quote.author, quote.author_profile
        ));
        if !quote.tags.is_empty() {
            out.push_str(&format!("   Tags: {}\n", quote.tags.join(", ")));
        }
    }

    out
}

/// Renders the listing as a Markdown document
pub fn render_markdown(listing: &QuoteListing) -> String {
    let mut md = String::new();

    md.push_str("# Quotes\n\n");
    md.push_str(&format!(
        "- **Total Quotes**: {}\n",
        listing.total_quotes
    ));
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if listing.quotes.is_empty() {
        md.push_str("_No quotes stored yet._\n");
        return md;
    }

    for quote in &listing.quotes {
        md.push_str(&blockquote(&quote.quote));
        md.push_str(&format!(
            "by [{}]({})\n\n",
            escape_link_text(&quote.author),
            quote.author_profile
        ));
        if !quote.tags.is_empty() {
            let tags: Vec<String> = quote.tags.iter().map(|t| format!("`{}`", t)).collect();
            md.push_str(&format!("Tags: {}\n\n", tags.join(" ")));
        }
        md.push_str("---\n\n");
    }

    md
}

/// Quotes every line of `text`, so embedded newlines stay inside the block
fn blockquote(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
    if out.is_empty() {
        out.push_str(">\n");
    }
    out.push('\n');
    out
}

/// Backslash-escapes characters that would end a link label early
fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Renders the listing as pretty-printed JSON
///
/// Shape: `{ "quotes": [...], "total_quotes": n }`.
pub fn render_json(listing: &QuoteListing) -> Result<String, HarvestError> {
    Ok(serde_json::to_string_pretty(listing)?)
}

/// Writes a rendering of the listing to a file
pub fn export_listing(
    listing: &QuoteListing,
    output_path: &Path,
    format: ListingFormat,
) -> Result<(), HarvestError> {
    let rendered = match format {
        ListingFormat::Text => render_text(listing),
        ListingFormat::Markdown => render_markdown(listing),
        ListingFormat::Json => render_json(listing)?,
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(output_path)?;
    file.write_all(rendered.as_bytes())?;

    Ok(())
}
