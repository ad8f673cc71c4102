//! Request logging at the default verbosity
//!
//! Kept in its own test binary so the captured subscriber is the only one
//! installed in the process.

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sumi_gateway::exports::{Arguments, ExportedFunction};
use sumi_gateway::server::log_directive;
use sumi_gateway::{build_router, synthesize};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_requests_logged_at_default_level() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_directive(0, false)))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let library = vec![ExportedFunction::from_signature("getLatest()", |_args: Arguments| async {
        Ok(vec!["one piece"])
    })
    .unwrap()];
    let router = build_router(Arc::new(synthesize(&library).unwrap()));

    let request = Request::builder()
        .uri("/api/get-latest")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let output = logs.contents();
    assert!(output.contains("/api/get-latest"), "no request line in: {output:?}");
    assert!(output.contains("status=200"), "no response status in: {output:?}");
}
