//! Shared mock-site helpers

use std::sync::Arc;
use sumi_index::config::CrawlerConfig;
use sumi_index::{Crawler, InvertedIndex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler configuration for tests
pub fn test_config(max_depth: u32, max_parallel: u32) -> CrawlerConfig {
    CrawlerConfig {
        max_depth,
        max_parallel,
        crawler_agent: "TestBot".to_string(),
    }
}

/// Creates a crawler writing into a fresh index
pub fn test_crawler(max_depth: u32, max_parallel: u32) -> Crawler {
    Crawler::new(
        test_config(max_depth, max_parallel),
        Arc::new(InvertedIndex::new()),
    )
    .expect("Failed to build crawler")
}

/// Serves a robots.txt with the given rules
pub async fn mount_robots(server: &MockServer, rules: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rules))
        .mount(server)
        .await;
}

/// Builds a page whose words are the title words plus one "link" per anchor
pub fn page_html(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">link</a>"#, link))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, anchors
    )
}

/// Serves a page that must be requested exactly `times` times
pub async fn mount_page(server: &MockServer, at: &str, title: &str, links: &[&str], times: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_html(title, links)))
        .expect(times)
        .mount(server)
        .await;
}

/// Seed URL for the mock site root
pub fn seed(server: &MockServer) -> String {
    format!("{}/", server.uri())
}
