//! HTTP layer
//!
//! Mounts one `GET` handler per synthesized route plus the `GET /api` listing,
//! and serves the router until Ctrl-C.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api` | List every route and its query parameters |
//! | GET | `/api/<kebab-name>` | Invoke the exported function behind the route |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use url::form_urlencoded;

use crate::dispatch::dispatch;
use crate::naming::API_PREFIX;
use crate::routes::{RouteEntry, RouteTable};

/// Builds the router for a synthesized route table
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sumi_gateway::exports::{Arguments, ExportedFunction};
/// use sumi_gateway::{build_router, synthesize};
///
/// let library = vec![ExportedFunction::from_signature("getLatest()", |_args: Arguments| async {
///     Ok(vec!["one piece"])
/// })
/// .unwrap()];
/// let table = Arc::new(synthesize(&library).unwrap());
/// let router = build_router(table);
/// ```
pub fn build_router(table: Arc<RouteTable>) -> Router {
    let mut router = Router::new();

    for entry in table.iter() {
        let path = entry.path.clone();
        let entry = Arc::clone(entry);
        router = router.route(
            &path,
            get(move |RawQuery(query): RawQuery| {
                let entry = Arc::clone(&entry);
                async move { call_route(&entry, query.as_deref()).await }
            }),
        );
    }

    let docs = Arc::new(table.docs());
    router
        .route(
            API_PREFIX,
            get(move || {
                let docs = Arc::clone(&docs);
                async move { Json(docs.as_ref().clone()) }
            }),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Log filter directives for a verbosity level
///
/// Requests are logged at `info`, so the default level shows one line per
/// request.
pub fn log_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "sumi_gateway=info,tower_http=info,warn",
        1 => "sumi_gateway=debug,tower_http=debug,info",
        2 => "sumi_gateway=trace,tower_http=trace,debug",
        _ => "trace",
    }
}

/// Handles one request to a function route
async fn call_route(entry: &RouteEntry, query: Option<&str>) -> Response {
    let pairs = parse_query(query);
    let outcome = dispatch(entry, &pairs).await;
    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.envelope)).into_response()
}

/// Decodes a raw query string into ordered key/value pairs
///
/// `+` decodes to a space and percent-escapes are resolved.
pub fn parse_query(query: Option<&str>) -> Vec<(String, String)> {
    match query {
        Some(q) => form_urlencoded::parse(q.as_bytes()).into_owned().collect(),
        None => Vec::new(),
    }
}

/// Binds `addr` and serves `router` until Ctrl-C
///
/// # Returns
///
/// * `Ok(())` - The server shut down after a signal
/// * `Err(std::io::Error)` - The listener could not be bound or the server failed
pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server running at: http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
