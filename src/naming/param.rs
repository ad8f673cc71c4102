use super::{join_on_separator, split_on_uppercase};

/// Derives the query-string name for a declared parameter
///
/// Every uppercase letter becomes an underscore followed by its lowercase form.
///
/// # Examples
///
/// ```
/// use sumi_gateway::naming::url_param;
///
/// assert_eq!(url_param("mangaId"), "manga_id");
/// assert_eq!(url_param("query"), "query");
/// ```
pub fn url_param(declared_name: &str) -> String {
    split_on_uppercase(declared_name, '_')
}

/// Recovers a declared parameter name from its query-string form
///
/// Inverse of [`url_param`] for camelCase names without underscores.
pub fn declared_param(url_name: &str) -> String {
    join_on_separator(url_name, '_')
}
