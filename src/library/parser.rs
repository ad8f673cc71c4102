//! HTML title and link extraction

use scraper::{Html, Selector};
use url::Url;

use super::normalize::extract_domain;

/// Title and outgoing links of an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Trimmed text of the first non-empty `<title>`
    pub title: Option<String>,

    /// Absolute HTTP(S) links in document order, without duplicates
    pub links: Vec<String>,
}

/// Parses HTML content and extracts the title and links
///
/// Links come from `<a href>` (except `download` anchors) and
/// `<link rel="canonical">`. Relative links are resolved against `base_url`.
/// `javascript:`, `mailto:`, `tel:`, `data:` and fragment-only links are
/// skipped, as is anything that does not resolve to HTTP(S). `rel="nofollow"`
/// links are kept.
///
/// # Example
///
/// ```
/// use sumi_gateway::library::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_links(&document, base_url),
    }
}

/// Keeps only the links whose host is `domain`
pub fn filter_same_domain(links: Vec<String>, domain: &str) -> Vec<String> {
    links
        .into_iter()
        .filter(|link| {
            Url::parse(link)
                .ok()
                .and_then(|url| extract_domain(&url))
                .is_some_and(|host| host == domain)
        })
        .collect()
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .find(|s| !s.is_empty())
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    let anchors = Selector::parse("a[href]").ok();
    let canonical = Selector::parse("link[rel='canonical'][href]").ok();

    let hrefs = anchors
        .iter()
        .flat_map(|s| document.select(s))
        .filter(|element| element.value().attr("download").is_none())
        .chain(canonical.iter().flat_map(|s| document.select(s)))
        .filter_map(|element| element.value().attr("href"));

    for href in hrefs {
        if let Some(link) = resolve_link(href, base_url) {
            if !links.contains(&link) {
                links.push(link);
            }
        }
    }

    links
}

/// Resolves an href to an absolute HTTP(S) URL, or `None` if it is skipped
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];
    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute.to_string()),
        _ => None,
    }
}
