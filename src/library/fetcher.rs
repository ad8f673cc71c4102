//! HTTP fetching for the bundled crawler functions
//!
//! One request per call: no retries, no rate limiting and no caching.

use std::time::Duration;

use reqwest::{redirect::Policy, Client, StatusCode};
use serde::Serialize;

use super::normalize::parse_http_url;
use super::parser::parse_html;
use crate::config::{FetcherConfig, UserAgentConfig};
use crate::{InvocationError, InvocationResult};

/// Maximum redirect hops followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// Summary of a fetched HTML page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,
    pub status_code: u16,
    pub content_type: String,
    pub title: Option<String>,
    pub links: Vec<String>,
}

/// Builds an HTTP client with the crawler's user agent and timeouts
///
/// # Example
///
/// ```
/// use sumi_gateway::config::{FetcherConfig, UserAgentConfig};
/// use sumi_gateway::library::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .https_only(fetcher.https_only)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an HTML page and extracts its title and links
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | URL malformed or not HTTP(S) | `InvalidInput` |
/// | Timeout, connection failure, too many redirects | `Failed` |
/// | Non-2xx status | `Failed` |
/// | Content-Type is not `text/html` | `Failed` |
pub async fn fetch_page(client: &Client, url: &str) -> InvocationResult<FetchedPage> {
    let target = parse_http_url(url)?;

    tracing::debug!("Fetching {}", target);
    let response = client
        .get(target.clone())
        .send()
        .await
        .map_err(|e| classify_request_error(target.as_str(), &e))?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(InvocationError::Failed(status_message(status, final_url.as_str())));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(InvocationError::Failed(format!(
            "Expected HTML from {}, got Content-Type '{}'",
            final_url, content_type
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| classify_request_error(final_url.as_str(), &e))?;

    let parsed = parse_html(&body, &final_url);

    Ok(FetchedPage {
        final_url: final_url.to_string(),
        status_code: status.as_u16(),
        content_type,
        title: parsed.title,
        links: parsed.links,
    })
}

/// Maps a transport error to a client-safe failure message
pub(crate) fn classify_request_error(url: &str, e: &reqwest::Error) -> InvocationError {
    let message = if e.is_timeout() {
        format!("Request timeout for {}", url)
    } else if e.is_connect() {
        format!("Connection failed for {}", url)
    } else if e.is_redirect() {
        format!("Too many redirects from {}", url)
    } else if e.is_builder() {
        return InvocationError::InvalidInput(format!("Cannot request {}", url));
    } else {
        format!("Request failed for {}", url)
    };
    InvocationError::Failed(message)
}

pub(crate) fn status_message(status: StatusCode, url: &str) -> String {
    match status {
        StatusCode::NOT_FOUND => format!("Page not found: {}", url),
        StatusCode::TOO_MANY_REQUESTS => format!("Rate limited by {}", url),
        _ => format!("HTTP {} for {}", status.as_u16(), url),
    }
}
