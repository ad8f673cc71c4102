//! Integration tests for the HTTP surface
//!
//! These tests build a router over a small in-memory manga library and drive
//! it with `tower::ServiceExt::oneshot`, checking status codes and JSON bodies.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sumi_gateway::exports::{Arguments, ExportedFunction};
use sumi_gateway::{build_router, synthesize, InvocationError};
use tower::ServiceExt;

fn manga_library() -> Vec<ExportedFunction> {
    vec![
        ExportedFunction::from_signature("searchManga(query, pageNumber)", |args: Arguments| async move {
            Ok(json!({
                "query": args.get(0),
                "pageNumber": args.get(1),
            }))
        })
        .unwrap(),
        ExportedFunction::from_signature("getMangaList()", |_args: Arguments| async {
            Ok(vec!["One Piece", "Berserk"])
        })
        .unwrap(),
        ExportedFunction::from_signature("getManga(mangaId)", |args: Arguments| async move {
            let id = args.required(0, "mangaId")?;
            if id == "404" {
                return Err(InvocationError::Failed(format!("Manga {} not found", id)));
            }
            Ok(json!({ "id": id }))
        })
        .unwrap(),
        ExportedFunction::from_signature(
            "getChapterPages(mangaId, chapterNumber)",
            |args: Arguments| async move { Ok(args.into_values()) },
        )
        .unwrap(),
        ExportedFunction::from_signature("slowLookup(delayMs)", |args: Arguments| async move {
            let delay: u64 = args
                .get(0)
                .unwrap_or("0")
                .parse()
                .map_err(|_| InvocationError::InvalidInput("delay_ms must be a number".to_string()))?;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(delay)
        })
        .unwrap(),
    ]
}

fn router() -> Router {
    let table = synthesize(&manga_library()).expect("Failed to synthesize routes");
    build_router(Arc::new(table))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_api_lists_every_route() {
    let (status, json) = get(router(), "/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "routes": {
                "/api/search-manga": { "params": ["query", "page_number"] },
                "/api/get-manga-list": { "params": [] },
                "/api/get-manga": { "params": ["manga_id"] },
                "/api/get-chapter-pages": { "params": ["manga_id", "chapter_number"] },
                "/api/slow-lookup": { "params": ["delay_ms"] },
            }
        })
    );
    assert_eq!(
        json["routes"].as_object().unwrap().len(),
        manga_library().len()
    );
}

#[tokio::test]
async fn test_query_bound_by_name() {
    let (status, json) = get(router(), "/api/search-manga?query=one+piece&page_number=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "success": true,
            "payload": { "query": "one piece", "pageNumber": "2" }
        })
    );
}

#[tokio::test]
async fn test_query_order_does_not_matter() {
    let (_, json) = get(router(), "/api/get-chapter-pages?chapter_number=7&manga_id=42").await;
    assert_eq!(json["payload"], json!(["42", "7"]));
}

#[tokio::test]
async fn test_missing_parameters_are_unset() {
    let (status, json) = get(router(), "/api/get-chapter-pages?chapter_number=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["payload"], json!([null, "7"]));
}

#[tokio::test]
async fn test_zero_parameter_route() {
    let (status, json) = get(router(), "/api/get-manga-list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "success": true, "payload": ["One Piece", "Berserk"] })
    );
}

#[tokio::test]
async fn test_unknown_parameter_rejected() {
    let (status, json) = get(router(), "/api/search-manga?bad=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "success": false,
            "reason": "Argument bad is not valid for the requested parameters: query, page_number"
        })
    );
}

#[tokio::test]
async fn test_unknown_parameters_plural() {
    let (status, json) = get(router(), "/api/search-manga?query=x&foo=1&bar=2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["reason"],
        "Arguments foo, bar are not valid for the requested parameters: query, page_number"
    );
}

#[tokio::test]
async fn test_declared_name_is_rejected() {
    let (status, json) = get(router(), "/api/get-manga?mangaId=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["reason"],
        "Argument mangaId is not valid for the requested parameters: manga_id"
    );
}

#[tokio::test]
async fn test_parameters_on_zero_parameter_route() {
    let (status, json) = get(router(), "/api/get-manga-list?page=2").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["reason"],
        "Argument page is not valid for the requested parameters: "
    );
}

#[tokio::test]
async fn test_invocation_failure_is_500() {
    let (status, json) = get(router(), "/api/get-manga?manga_id=404").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({ "success": false, "reason": "Manga 404 not found" })
    );
}

#[tokio::test]
async fn test_invalid_input_is_400() {
    let (status, json) = get(router(), "/api/get-manga").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({ "success": false, "reason": "Missing required argument mangaId" })
    );
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let router = router();
    let (_, first) = get(router.clone(), "/api/get-manga?manga_id=13").await;
    let (_, second) = get(router, "/api/get-manga?manga_id=13").await;

    assert_eq!(first, second);
    assert_eq!(first["payload"], json!({ "id": "13" }));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(router(), "/api/get-everything").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slow_calls_do_not_block_each_other() {
    let router = router();
    let started = std::time::Instant::now();

    let requests = (0..8).map(|_| get(router.clone(), "/api/slow-lookup?delay_ms=200"));
    let results = futures::future::join_all(requests).await;

    for (status, json) in results {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["payload"], json!(200));
    }
    assert!(started.elapsed() < Duration::from_millis(1500));
}
