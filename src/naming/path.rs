use super::{join_on_separator, split_on_uppercase};

/// Prefix shared by every synthesized route, and the path of the route listing
pub const API_PREFIX: &str = "/api";

/// Derives the route path for an exported function
///
/// Every uppercase letter becomes a hyphen followed by its lowercase form, and
/// the result is placed under `/api/`.
///
/// # Examples
///
/// ```
/// use sumi_gateway::naming::route_path;
///
/// assert_eq!(route_path("getMangaList"), "/api/get-manga-list");
/// assert_eq!(route_path("search"), "/api/search");
/// ```
pub fn route_path(function_name: &str) -> String {
    format!("{}/{}", API_PREFIX, split_on_uppercase(function_name, '-'))
}

/// Recovers a function name from a route path
///
/// This is the inverse of [`route_path`] for identifiers that do not start
/// with an uppercase letter and contain no digits or underscores next to a
/// case change. Returns `None` for paths outside `/api/`.
///
/// # Examples
///
/// ```
/// use sumi_gateway::naming::function_name;
///
/// assert_eq!(function_name("/api/get-manga-list"), Some("getMangaList".to_string()));
/// assert_eq!(function_name("/health"), None);
/// ```
pub fn function_name(path: &str) -> Option<String> {
    let rest = path.strip_prefix(API_PREFIX)?.strip_prefix('/')?;
    if rest.is_empty() {
        return None;
    }
    Some(join_on_separator(rest, '-'))
}
