use thiserror::Error;

use crate::exports::Arguments;
use crate::routes::RouteEntry;

/// Errors raised while binding a query string to a route
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    /// One or more query keys are not parameters of the route
    #[error("{}", unknown_parameters_message(.rejected, .valid))]
    UnknownParameters {
        rejected: Vec<String>,
        valid: Vec<String>,
    },
}

fn unknown_parameters_message(rejected: &[String], valid: &[String]) -> String {
    if rejected.len() == 1 {
        format!(
            "Argument {} is not valid for the requested parameters: {}",
            rejected[0],
            valid.join(", ")
        )
    } else {
        format!(
            "Arguments {} are not valid for the requested parameters: {}",
            rejected.join(", "),
            valid.join(", ")
        )
    }
}

/// Binds decoded query pairs to the route's positional arguments
///
/// Every key that is not one of the route's query parameters is collected
/// first; if any are found nothing is bound and all of them are reported.
/// Otherwise each value is placed at its parameter's declared position. A key
/// given more than once keeps its last value, and parameters that were not
/// supplied stay unset.
///
/// # Arguments
///
/// * `entry` - The route being served
/// * `query` - Decoded query pairs in the order they appeared
///
/// # Returns
///
/// * `Ok(Arguments)` - Positional arguments sized to the function's arity
/// * `Err(BindError)` - The query contained unknown keys
pub fn bind(entry: &RouteEntry, query: &[(String, String)]) -> Result<Arguments, BindError> {
    let mut rejected: Vec<String> = Vec::new();
    for (key, _) in query {
        if entry.binding(key).is_none() && !rejected.contains(key) {
            rejected.push(key.clone());
        }
    }

    if !rejected.is_empty() {
        return Err(BindError::UnknownParameters {
            rejected,
            valid: entry.doc_params().into_iter().map(str::to_string).collect(),
        });
    }

    let mut args = Arguments::with_len(entry.arity());
    for (key, value) in query {
        if let Some(binding) = entry.binding(key) {
            args.set(binding.position, value.clone());
        }
    }

    Ok(args)
}
