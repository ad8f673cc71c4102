//! URL normalization and domain extraction

use thiserror::Error;
use url::form_urlencoded;
use url::Url;

use crate::InvocationError;

/// Query parameters that only track the visitor
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "mc_eid",
    "ref",
    "source",
];

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {reason}")]
    Parse { url: String, reason: String },

    #[error("Only HTTP and HTTPS URLs are supported, got scheme '{0}'")]
    InvalidScheme(String),

    #[error("URL '{0}' has no domain")]
    MissingDomain(String),

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

impl From<UrlError> for InvocationError {
    fn from(e: UrlError) -> Self {
        InvocationError::InvalidInput(e.to_string())
    }
}

/// Parses an absolute HTTP(S) URL
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse {
        url: url_str.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain(url_str.to_string()));
    }

    Ok(url)
}

/// Normalizes a URL into its canonical crawl form
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Upgrade `http` to `https`
/// 3. Lowercase the host and drop a `www.` prefix
/// 4. Remove dot segments, empty segments and the trailing slash (root stays `/`)
/// 5. Remove the fragment
/// 6. Drop tracking query parameters, sort the rest by key, drop an empty query
///
/// # Examples
///
/// ```
/// use sumi_gateway::library::normalize_url;
///
/// let url = normalize_url("http://WWW.EXAMPLE.COM/page/?utm_source=x#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = parse_http_url(url_str)?;

    if url.scheme() == "http" {
        url.set_scheme("https")
            .map_err(|_| UrlError::Malformed(format!("Cannot upgrade {} to https", url_str)))?;
    }

    let host = extract_domain(&url).ok_or_else(|| UrlError::MissingDomain(url_str.to_string()))?;
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Malformed(format!("Failed to set host: {}", e)))?;

    let path = normalize_path(url.path());
    url.set_path(&path);

    url.set_fragment(None);

    if url.query().is_some() {
        let mut params: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| !is_tracking_param(key))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        params.sort_by(|a, b| a.0.cmp(&b.0));

        if params.is_empty() {
            url.set_query(None);
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.set_query(Some(&query));
        }
    }

    Ok(url)
}

/// Returns the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_gateway::library::extract_domain;
///
/// let url = Url::parse("https://Blog.Example.COM:8443/post").unwrap();
/// assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
