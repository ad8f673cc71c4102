//! Naming conventions between library identifiers and the HTTP surface
//!
//! Function names become kebab-case route paths under `/api/`, and declared
//! parameter names become snake_case query parameters. Both directions are
//! pure string transforms over ASCII identifiers. They are lossy: distinct
//! identifiers can map to the same derived name, which route synthesis checks.

mod param;
mod path;

pub use param::{declared_param, url_param};
pub use path::{function_name, route_path, API_PREFIX};

/// Replaces every ASCII uppercase letter with `separator` followed by its
/// lowercase form. All other characters are kept as they are.
fn split_on_uppercase(identifier: &str, separator: char) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for c in identifier.chars() {
        if c.is_ascii_uppercase() {
            out.push(separator);
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Reverses [`split_on_uppercase`]: each `separator` is dropped and the
/// character after it is uppercased.
fn join_on_separator(name: &str, separator: char) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == separator {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
