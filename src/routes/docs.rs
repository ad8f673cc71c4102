use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The route listing served at `GET /api`
///
/// Serializes as `{"routes": {"/api/<name>": {"params": [...]}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDocs {
    pub routes: BTreeMap<String, RouteDoc>,
}

/// Accepted query parameters for one route, in declared order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDoc {
    pub params: Vec<String>,
}
