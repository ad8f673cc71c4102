//! Integration tests for the bundled crawler library
//!
//! These tests use wiremock to stand in for crawled sites and call the
//! library through the gateway router, end to end.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sumi_gateway::config::Config;
use sumi_gateway::library::SumiLibrary;
use sumi_gateway::{build_router, synthesize};
use tower::ServiceExt;
use url::form_urlencoded;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn router() -> Router {
    let library = SumiLibrary::new(&Config::default()).expect("Failed to build library");
    let table = synthesize(&library).expect("Failed to synthesize routes");
    build_router(Arc::new(table))
}

/// Builds `/api/<route>?k=v&...` with the values form-encoded
fn api(route: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("/api/{}?{}", route, query)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn mount_index(server: &MockServer) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&format!(
            r#"<html><head><title>Manga Index</title></head><body>
            <a href="/manga/1">One</a>
            <a href="{}/manga/2">Two</a>
            <a href="https://other.example.org/elsewhere">Elsewhere</a>
            <a href="mailto:admin@example.com">Mail</a>
            </body></html>"#,
            base
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_page() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    let base = server.uri();

    let (status, json) = get(router(), &api("fetch-page", &[("url", format!("{}/", base).as_str())])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let payload = &json["payload"];
    assert_eq!(payload["finalUrl"], format!("{}/", base));
    assert_eq!(payload["statusCode"], 200);
    assert!(payload["contentType"].as_str().unwrap().contains("text/html"));
    assert_eq!(payload["title"], "Manga Index");
    assert_eq!(
        payload["links"],
        json!([
            format!("{}/manga/1", base),
            format!("{}/manga/2", base),
            "https://other.example.org/elsewhere",
        ])
    );
}

#[tokio::test]
async fn test_get_title() {
    let server = MockServer::start().await;
    mount_index(&server).await;

    let (status, json) = get(router(), &api("get-title", &[("url", server.uri().as_str())])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "success": true, "payload": "Manga Index" }));
}

#[tokio::test]
async fn test_extract_links_same_domain() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    let base = server.uri();

    let (status, json) = get(
        router(),
        &api("extract-links", &[("url", base.as_str()), ("same_domain", "true")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["payload"],
        json!([format!("{}/manga/1", base), format!("{}/manga/2", base)])
    );
}

#[tokio::test]
async fn test_extract_links_bad_flag() {
    let (status, json) = get(
        router(),
        &api("extract-links", &[("url", "https://example.com/"), ("same_domain", "perhaps")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["reason"],
        "Argument sameDomain must be true or false, got 'perhaps'"
    );
}

#[tokio::test]
async fn test_fetch_missing_page_is_500() {
    let server = MockServer::start().await;
    let url = format!("{}/missing", server.uri());

    let (status, json) = get(router(), &api("fetch-page", &[("url", url.as_str())])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({ "success": false, "reason": format!("Page not found: {}", url) })
    );
}

#[tokio::test]
async fn test_fetch_non_html_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"{}".to_vec(), "application/json"))
        .mount(&server)
        .await;

    let url = format!("{}/data.json", server.uri());
    let (status, json) = get(router(), &api("fetch-page", &[("url", url.as_str())])).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["reason"]
        .as_str()
        .unwrap()
        .starts_with("Expected HTML from"));
}

#[tokio::test]
async fn test_fetch_invalid_url_is_400() {
    let (status, json) = get(router(), &api("fetch-page", &[("url", "ftp://example.com/")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["reason"],
        "Only HTTP and HTTPS URLs are supported, got scheme 'ftp'"
    );
}

#[tokio::test]
async fn test_check_robots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: *\nDisallow: /private\nCrawl-delay: 2\n\nUser-agent: MangaBot\nDisallow: /\n",
        ))
        .mount(&server)
        .await;
    let base = server.uri();

    let private = format!("{}/private/page", base);
    let (status, json) = get(router(), &api("check-robots", &[("url", private.as_str())])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["payload"],
        json!({
            "robotsUrl": format!("{}/robots.txt", base),
            "allowed": false,
            "crawlDelay": 2.0,
        })
    );

    let public = format!("{}/public", base);
    let (_, json) = get(router(), &api("check-robots", &[("url", public.as_str())])).await;
    assert_eq!(json["payload"]["allowed"], true);

    let (_, json) = get(
        router(),
        &api("check-robots", &[("url", public.as_str()), ("user_agent", "MangaBot")]),
    )
    .await;
    assert_eq!(json["payload"]["allowed"], false);
}

#[tokio::test]
async fn test_check_robots_without_robots_txt() {
    let server = MockServer::start().await;
    let url = format!("{}/anything", server.uri());

    let (status, json) = get(router(), &api("check-robots", &[("url", url.as_str())])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["payload"]["allowed"], true);
    assert_eq!(json["payload"]["crawlDelay"], Value::Null);
}

#[tokio::test]
async fn test_normalize_url_needs_no_network() {
    let (status, json) = get(
        router(),
        &api("normalize-url", &[("url", "http://WWW.Example.com/a/./b/?utm_source=x&z=1&a=2#top")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["payload"], "https://example.com/a/b?a=2&z=1");
}
