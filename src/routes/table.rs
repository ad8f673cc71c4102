use std::collections::HashMap;
use std::sync::Arc;

use super::{ApiDocs, RouteDoc};
use crate::exports::ExportedFunction;

/// How one query parameter reaches the function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamBinding {
    /// Name clients use in the query string
    pub url_name: String,
    /// Name the function declares
    pub declared_name: String,
    /// Position in the function's argument list
    pub position: usize,
}

/// A route bound to exactly one exported function
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub path: String,
    /// Query bindings in declared parameter order
    pub bindings: Vec<ParamBinding>,
    pub function: ExportedFunction,
}

impl RouteEntry {
    /// Looks up the binding for a query-string name
    pub fn binding(&self, url_name: &str) -> Option<&ParamBinding> {
        self.bindings.iter().find(|b| b.url_name == url_name)
    }

    /// Query-string names in declared order
    pub fn doc_params(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.url_name.as_str()).collect()
    }

    pub fn arity(&self) -> usize {
        self.bindings.len()
    }
}

/// All synthesized routes, in export order
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<Arc<RouteEntry>>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    pub(super) fn insert(&mut self, entry: RouteEntry) {
        self.by_path.insert(entry.path.clone(), self.entries.len());
        self.entries.push(Arc::new(entry));
    }

    /// Finds the route registered at `path`
    pub fn get(&self, path: &str) -> Option<&Arc<RouteEntry>> {
        self.by_path.get(path).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RouteEntry>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the listing served at `/api`
    pub fn docs(&self) -> ApiDocs {
        let routes = self
            .entries
            .iter()
            .map(|entry| {
                let params = entry.doc_params().into_iter().map(str::to_string).collect();
                (entry.path.clone(), RouteDoc { params })
            })
            .collect();
        ApiDocs { routes }
    }
}
