//! robots.txt lookups
//!
//! Rules are fetched fresh on every call; nothing is cached.

use reqwest::{Client, StatusCode};
use robotstxt::DefaultMatcher;
use serde::Serialize;
use url::Url;

use super::fetcher::{classify_request_error, status_message};
use super::normalize::parse_http_url;
use crate::{InvocationError, InvocationResult};

/// Answer to "may this agent crawl this URL?"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsVerdict {
    pub robots_url: String,
    pub allowed: bool,
    /// Crawl-delay in seconds, if the site sets one for this agent
    pub crawl_delay: Option<f64>,
}

/// Parsed robots.txt rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRobots {
    /// Raw robots.txt content; empty means everything is allowed
    content: String,
}

impl ParsedRobots {
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Rules that allow everything, used when a site has no robots.txt
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checks whether `user_agent` may fetch `url`
    ///
    /// `url` may be absolute or a path such as `/page.html`.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Crawl-delay for `user_agent`, preferring its own group over `*`
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_group_header = false;
        let mut for_agent: Option<f64> = None;
        let mut for_wildcard: Option<f64> = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key == "user-agent" {
                if !in_group_header {
                    group.clear();
                }
                if !value.is_empty() {
                    group.push(value.to_lowercase());
                }
                in_group_header = true;
                continue;
            }
            in_group_header = false;

            if key != "crawl-delay" {
                continue;
            }
            let Ok(delay) = value.parse::<f64>() else {
                continue;
            };

            if group.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                for_agent.get_or_insert(delay);
            } else if group.iter().any(|ua| ua == "*") {
                for_wildcard.get_or_insert(delay);
            }
        }

        for_agent.or(for_wildcard)
    }
}

/// The robots.txt location for a URL's origin
pub fn robots_url(url: &Url) -> InvocationResult<Url> {
    url.join("/robots.txt")
        .map_err(|e| InvocationError::InvalidInput(format!("Cannot derive robots.txt URL: {}", e)))
}

/// Fetches and parses robots.txt
///
/// A 404 or 410 means the site sets no rules. Any other non-2xx status is a
/// failure.
pub async fn fetch_robots(client: &Client, robots: &Url) -> InvocationResult<ParsedRobots> {
    tracing::debug!("Fetching {}", robots);
    let response = client
        .get(robots.clone())
        .send()
        .await
        .map_err(|e| classify_request_error(robots.as_str(), &e))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return Ok(ParsedRobots::allow_all());
    }
    if !status.is_success() {
        return Err(InvocationError::Failed(status_message(status, robots.as_str())));
    }

    let content = response
        .text()
        .await
        .map_err(|e| classify_request_error(robots.as_str(), &e))?;
    Ok(ParsedRobots::from_content(&content))
}

/// Checks a URL against its site's robots.txt
pub async fn check_robots(
    client: &Client,
    url: &str,
    user_agent: &str,
) -> InvocationResult<RobotsVerdict> {
    let target = parse_http_url(url)?;
    let location = robots_url(&target)?;
    let robots = fetch_robots(client, &location).await?;

    Ok(RobotsVerdict {
        robots_url: location.to_string(),
        allowed: robots.is_allowed(target.as_str(), user_agent),
        crawl_delay: robots.crawl_delay(user_agent),
    })
}
