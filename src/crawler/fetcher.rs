//! HTTP fetcher implementation
//!
//! One plain GET per page. There is no retry: any transport failure or
//! non-2xx status is returned as an error and ends the run.

use crate::HarvestError;
use reqwest::Client;
use url::Url;

/// A successfully fetched page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

/// Builds the HTTP client used for the whole run
///
/// No custom headers and no explicit timeout; the client defaults apply.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().build()
}

/// Fetches a single page
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page to fetch
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with its body
/// * `Err(HarvestError::HttpStatus)` - Any non-2xx response
/// * `Err(HarvestError::Http)` - Connection, timeout, or body read failure
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, HarvestError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}
