//! Page title fetching
//!
//! Fetches a URL and extracts the document title when saving a new link.
//! Every failure is returned as a [`FetchError`] so the caller can report
//! it instead of saving a link it could not resolve.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use scraper::{Html, Selector};
use thiserror::Error;

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Why a title could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL does not parse or is not http(s)
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, TLS, timeout or body read failure
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("'{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// The page has no usable title
    #[error("No title found at '{url}'")]
    MissingTitle { url: String },
}

/// Check that a URL is absolute http(s) with a host
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("only http and https URLs can be saved"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(parsed)
}

/// Fetch a page and return its title
pub async fn fetch_title(url: &str) -> Result<String, FetchError> {
    let parsed = validate_url(url)?;
    let request_error = |source| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent("Mozilla/5.0 (compatible; modtasty/0.3)")
        .build()
        .map_err(request_error)?;

    let response = client.get(parsed).send().await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let html = response.text().await.map_err(request_error)?;
    extract_title(&html).ok_or_else(|| FetchError::MissingTitle {
        url: url.to_string(),
    })
}

/// Extract the title from an HTML document
///
/// Uses `<title>`, falling back to `og:title`. Runs of whitespace inside
/// the title collapse to a single space.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let from_tag = Selector::parse("title").ok().and_then(|selector| {
        document
            .select(&selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|s| !s.is_empty())
    });
    if from_tag.is_some() {
        return from_tag;
    }

    let selector = Selector::parse(r#"meta[property="og:title"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
