//! Integration tests for static file serving and response headers.
//!
//! Run with: cargo test -p bookstall-integration-tests

#![allow(clippy::unwrap_used)]

use bookstall_integration_tests::TestContext;
use reqwest::header::{CACHE_CONTROL, EXPIRES, PRAGMA};

fn assert_no_cache(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(
        headers.get(CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
    assert_eq!(headers.get(EXPIRES).unwrap(), "0");
}

#[tokio::test]
async fn test_static_page_is_served_uncached() {
    let ctx = TestContext::new().await;
    ctx.write_static_file("book.html", "<h1>Catalog</h1>");

    let response = ctx.client.get(ctx.url("/book.html")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_no_cache(&response);
    assert_eq!(response.text().await.unwrap(), "<h1>Catalog</h1>");
}

#[tokio::test]
async fn test_nested_asset_is_served() {
    let ctx = TestContext::new().await;
    ctx.write_static_file("css/style.css", "body { margin: 0; }");

    let response = ctx.client.get(ctx.url("/css/style.css")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert!(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn test_missing_file_is_not_found_and_uncached() {
    let ctx = TestContext::new().await;

    let response = ctx.client.get(ctx.url("/nope.html")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert_no_cache(&response);
}

#[tokio::test]
async fn test_handler_responses_are_uncached() {
    let ctx = TestContext::new().await;

    let response = ctx
        .client
        .post(ctx.url("/cgi-bin/login"))
        .form(&[("username", "a"), ("password", "b")])
        .send()
        .await
        .unwrap();

    assert_no_cache(&response);
}

#[tokio::test]
async fn test_readiness_reports_data_dir() {
    let ctx = TestContext::new().await;

    let ready = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(ready.status().as_u16(), 200);

    std::fs::remove_dir_all(ctx.data_dir()).unwrap();

    let not_ready = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(not_ready.status().as_u16(), 503);
}
