//! Route synthesis
//!
//! Turns a crawler library's exported functions into an immutable
//! [`RouteTable`]. Each function gets one route whose path and query parameter
//! names are derived with the [`crate::naming`] conventions. Synthesis fails if
//! two functions derive the same path or two parameters of one function
//! derive the same query name.

mod docs;
mod table;

pub use docs::{ApiDocs, RouteDoc};
pub use table::{ParamBinding, RouteEntry, RouteTable};

use crate::exports::{CrawlerLibrary, ExportedFunction};
use crate::naming::{route_path, url_param};
use crate::SynthesisError;

/// Builds the route table for every function exported by `library`
///
/// # Arguments
///
/// * `library` - The crawler library to expose
///
/// # Returns
///
/// * `Ok(RouteTable)` - One entry per exported function, in export order
/// * `Err(SynthesisError)` - A declaration is malformed, or two functions or
///   two parameters collide
pub fn synthesize<L: CrawlerLibrary + ?Sized>(library: &L) -> Result<RouteTable, SynthesisError> {
    let mut table = RouteTable::default();

    for function in library.exports()? {
        let entry = route_entry(function)?;

        if let Some(existing) = table.get(&entry.path) {
            return Err(SynthesisError::DuplicateRoute {
                path: entry.path.clone(),
                first: existing.function.name().to_string(),
                second: entry.function.name().to_string(),
            });
        }

        tracing::debug!(
            path = %entry.path,
            params = ?entry.doc_params(),
            "Synthesized route for {}",
            entry.function.name()
        );
        table.insert(entry);
    }

    Ok(table)
}

/// Derives the route entry for a single exported function
pub fn route_entry(function: ExportedFunction) -> Result<RouteEntry, SynthesisError> {
    let path = route_path(function.name());
    let mut bindings: Vec<ParamBinding> = Vec::with_capacity(function.params().len());

    for (position, declared) in function.params().iter().enumerate() {
        let url_name = url_param(declared);

        if let Some(existing) = bindings.iter().find(|b| b.url_name == url_name) {
            return Err(SynthesisError::ParameterCollision {
                function: function.name().to_string(),
                url_param: url_name,
                first: existing.declared_name.clone(),
                second: declared.clone(),
            });
        }

        bindings.push(ParamBinding {
            url_name,
            declared_name: declared.clone(),
            position,
        });
    }

    Ok(RouteEntry {
        path,
        bindings,
        function,
    })
}
