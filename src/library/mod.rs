//! Bundled crawler library
//!
//! A small crawler surface served by the gateway binary. Each function is
//! stateless: it fetches at most one page (or one robots.txt) per call.
//!
//! | Function | Parameters | Payload |
//! |---|---|---|
//! | `fetchPage` | `url` | `{finalUrl, statusCode, contentType, title, links}` |
//! | `getTitle` | `url` | page title or `null` |
//! | `extractLinks` | `url, sameDomain` | absolute links, optionally limited to the page's domain |
//! | `checkRobots` | `url, userAgent` | `{robotsUrl, allowed, crawlDelay}` |
//! | `normalizeUrl` | `url` | canonical URL string |
//! | `extractDomain` | `url` | lowercase host |

mod fetcher;
mod normalize;
mod parser;
mod robots;

pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use normalize::{extract_domain, normalize_url, parse_http_url, UrlError};
pub use parser::{filter_same_domain, parse_html, ParsedPage};
pub use robots::{check_robots, fetch_robots, robots_url, ParsedRobots, RobotsVerdict};

use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::exports::{Arguments, CrawlerLibrary, ExportedFunction};
use crate::{IntrospectError, InvocationError, InvocationResult};

/// The crawler functions shipped with the gateway
#[derive(Debug, Clone)]
pub struct SumiLibrary {
    client: Client,
    /// Agent checked by `checkRobots` when the caller names none
    default_agent: Arc<str>,
}

impl SumiLibrary {
    /// Builds the library's HTTP client from the configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, &config.fetcher)?;
        Ok(Self::with_client(client, &config.user_agent.crawler_name))
    }

    pub fn with_client(client: Client, default_agent: &str) -> Self {
        Self {
            client,
            default_agent: Arc::from(default_agent),
        }
    }
}

impl CrawlerLibrary for SumiLibrary {
    fn exports(&self) -> Result<Vec<ExportedFunction>, IntrospectError> {
        let client = self.client.clone();
        let fetch = ExportedFunction::from_signature("fetchPage(url)", move |args: Arguments| {
            let client = client.clone();
            async move { fetch_page(&client, args.required(0, "url")?).await }
        })?;

        let client = self.client.clone();
        let title = ExportedFunction::from_signature("getTitle(url)", move |args: Arguments| {
            let client = client.clone();
            async move {
                let page = fetch_page(&client, args.required(0, "url")?).await?;
                Ok(page.title)
            }
        })?;

        let client = self.client.clone();
        let links = ExportedFunction::from_signature(
            "extractLinks(url, sameDomain)",
            move |args: Arguments| {
                let client = client.clone();
                async move {
                    let same_domain = parse_flag(args.get(1), "sameDomain")?;
                    let page = fetch_page(&client, args.required(0, "url")?).await?;
                    if !same_domain {
                        return Ok(page.links);
                    }
                    let final_url = parse_http_url(&page.final_url)?;
                    let domain = extract_domain(&final_url).unwrap_or_default();
                    Ok(filter_same_domain(page.links, &domain))
                }
            },
        )?;

        let client = self.client.clone();
        let default_agent = Arc::clone(&self.default_agent);
        let robots = ExportedFunction::from_signature(
            "checkRobots(url, userAgent)",
            move |args: Arguments| {
                let client = client.clone();
                let default_agent = Arc::clone(&default_agent);
                async move {
                    let agent = match args.get(1) {
                        Some(agent) if !agent.trim().is_empty() => agent,
                        _ => &*default_agent,
                    };
                    check_robots(&client, args.required(0, "url")?, agent).await
                }
            },
        )?;

        let normalize = ExportedFunction::from_signature("normalizeUrl(url)", |args: Arguments| async move {
            let url = normalize_url(args.required(0, "url")?)?;
            Ok(url.to_string())
        })?;

        let domain = ExportedFunction::from_signature("extractDomain(url)", |args: Arguments| async move {
            let url = parse_http_url(args.required(0, "url")?)?;
            Ok(extract_domain(&url))
        })?;

        Ok(vec![fetch, title, links, robots, normalize, domain])
    }
}

/// Reads an optional boolean query value; absent or empty means `false`
fn parse_flag(value: Option<&str>, name: &str) -> InvocationResult<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(InvocationError::InvalidInput(format!(
            "Argument {} must be true or false, got '{}'",
            name, other
        ))),
    }
}
