//! Integration tests for the HTTP API
//!
//! Each test serves the router on an ephemeral loopback port and talks to it
//! with a plain reqwest client.

use crate::support::{mount_page, mount_robots, seed, test_crawler};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sumi_index::server::{router, AppState};
use sumi_index::Crawler;
use tokio::net::TcpListener;
use wiremock::MockServer;

/// Serves the API in the background and returns its base URL
async fn spawn_api(crawler: Crawler) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    let app = router(AppState::new(crawler));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("API server failed");
    });

    format!("http://{}", addr)
}

async fn post_index(api: &str, body: &str) -> (StatusCode, Value) {
    let response = Client::new()
        .post(format!("{}/index", api))
        .header("Content-Type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("POST /index failed");
    let status = response.status();
    let text = response.text().await.expect("Unreadable body");
    (status, serde_json::from_str(&text).expect("Body is not JSON"))
}

async fn get_search(api: &str, word: &str) -> (StatusCode, String) {
    let response = Client::new()
        .get(format!("{}/search/{}", api, word))
        .send()
        .await
        .expect("GET /search failed");
    let status = response.status();
    (status, response.text().await.expect("Unreadable body"))
}

async fn delete_index(api: &str) -> StatusCode {
    Client::new()
        .delete(format!("{}/index", api))
        .send()
        .await
        .expect("DELETE /index failed")
        .status()
}

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_page(&server, "/", "Test Title", &[], 1).await;
    server
}

#[tokio::test]
async fn test_index_then_search() {
    let site = mock_site().await;
    let api = spawn_api(test_crawler(3, 5)).await;

    let body = json!({ "URL": seed(&site) }).to_string();
    let (status, totals) = post_index(&api, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals, json!({ "SitesIndexed": 1, "WordsIndexed": 2 }));

    let (status, text) = get_search(&api, "test").await;
    assert_eq!(status, StatusCode::OK);
    let results: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(results, json!([{ "Title": "Test Title", "Count": 1 }]));

    let (status, upper) = get_search(&api, "TITLE").await;
    assert_eq!(status, StatusCode::OK);
    let results: Value = serde_json::from_str(&upper).unwrap();
    assert_eq!(results, json!([{ "Title": "Test Title", "Count": 1 }]));
}

#[tokio::test]
async fn test_index_requires_url() {
    let api = spawn_api(test_crawler(3, 5)).await;
    let expected = json!({ "error": "Please include URL in Body of Request" });

    for body in [r#"{}"#, r#"{"URL":""}"#, "not json"] {
        let (status, error) = post_index(&api, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);
        assert_eq!(error, expected);
    }
}

#[tokio::test]
async fn test_search_for_absent_word_is_null() {
    let api = spawn_api(test_crawler(3, 5)).await;

    let (status, text) = get_search(&api, "missing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "null");
}

#[tokio::test]
async fn test_search_rejects_non_alphabetic_words() {
    let api = spawn_api(test_crawler(3, 5)).await;

    let (status, _) = get_search(&api, "abc123").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_clears_the_index() {
    let site = mock_site().await;
    let api = spawn_api(test_crawler(3, 5)).await;

    let body = json!({ "URL": seed(&site) }).to_string();
    let (status, _) = post_index(&api, &body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(delete_index(&api).await, StatusCode::NO_CONTENT);
    let (_, text) = get_search(&api, "test").await;
    assert_eq!(text, "null");

    // Clearing an empty index is fine
    assert_eq!(delete_index(&api).await, StatusCode::NO_CONTENT);
}
