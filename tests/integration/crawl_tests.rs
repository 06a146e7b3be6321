//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock sites and run full crawls
//! end-to-end against them.

use crate::support::{mount_page, mount_robots, seed, test_config, test_crawler};
use std::sync::Arc;
use std::time::{Duration, Instant};
use sumi_index::{search, CrawlAggregate, Crawler, InvertedIndex, RankedEntry};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_one_page_site() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    // The outbound link points at a host whose robots.txt cannot be fetched
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><title>Test Title</title></head><body><a href="http://127.0.0.1:9/b">Test Link</a></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = test_crawler(3, 5);
    let report = crawler.crawl(&seed(&server)).await;

    assert_eq!(
        report.aggregate(),
        CrawlAggregate {
            sites_indexed: 1,
            words_indexed: 3,
        }
    );
    assert_eq!(report.pages.len(), 1);
    assert_eq!(
        search(crawler.index(), "test"),
        Some(vec![RankedEntry::new("Test Title", 2)])
    );
}

#[tokio::test]
async fn test_error_status_pages_are_indexed() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("<title>Not Found</title><p>Missing page</p>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let crawler = test_crawler(3, 5);
    let totals = crawler.start_crawl(&seed(&server)).await;

    assert_eq!(
        totals,
        CrawlAggregate {
            sites_indexed: 1,
            words_indexed: 4,
        }
    );
    assert_eq!(
        search(crawler.index(), "missing"),
        Some(vec![RankedEntry::new("Not Found", 1)])
    );
}

#[tokio::test]
async fn test_depth_limit_is_exclusive() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_page(&server, "/", "Root", &["/level1"], 1).await;
    mount_page(&server, "/level1", "One", &["/level2"], 1).await;
    mount_page(&server, "/level2", "Two", &["/level3"], 1).await;
    mount_page(&server, "/level3", "Three", &[], 0).await;

    let report = test_crawler(3, 5).crawl(&seed(&server)).await;

    assert_eq!(report.aggregate().sites_indexed, 3);
    let mut depths: Vec<u32> = report.pages.iter().map(|p| p.depth).collect();
    depths.sort_unstable();
    assert_eq!(depths, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_depth_one_fetches_only_the_seed() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_page(&server, "/", "Root", &["/next"], 1).await;
    mount_page(&server, "/next", "Next", &[], 0).await;

    let totals = test_crawler(1, 5).start_crawl(&seed(&server)).await;
    assert_eq!(totals.sites_indexed, 1);
}

#[tokio::test]
async fn test_robots_disallowed_pages_are_never_fetched() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /admin").await;

    mount_page(&server, "/", "Root", &["/admin", "/public"], 1).await;
    mount_page(&server, "/admin", "Admin", &[], 0).await;
    mount_page(&server, "/public", "Public", &[], 1).await;

    let totals = test_crawler(3, 5).start_crawl(&seed(&server)).await;
    assert_eq!(totals.sites_indexed, 2);
}

#[tokio::test]
async fn test_missing_robots_blocks_the_whole_site() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "Root", &[], 0).await;

    let report = test_crawler(3, 5).crawl(&seed(&server)).await;
    assert!(report.pages.is_empty());
    assert_eq!(report.aggregate(), CrawlAggregate::default());
}

#[tokio::test]
async fn test_cycles_are_fetched_once() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_page(&server, "/", "Root", &["/a", "/"], 1).await;
    mount_page(&server, "/a", "A", &["/", "/a", "/b"], 1).await;
    mount_page(&server, "/b", "B", &["/a", "/"], 1).await;

    let report = test_crawler(10, 5).crawl(&seed(&server)).await;
    assert_eq!(report.aggregate().sites_indexed, 3);
    assert_eq!(report.pages.len(), 3);
}

#[tokio::test]
async fn test_failed_pages_do_not_stop_the_crawl() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_page(&server, "/", "Root", &["/broken", "/ok"], 1).await;
    // Allowed by robots.txt, but the redirect target refuses connections
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "http://127.0.0.1:9/gone"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "Ok", &[], 1).await;

    let report = test_crawler(3, 5).crawl(&seed(&server)).await;
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.aggregate().sites_indexed, 2);

    let failed: Vec<_> = report.pages.iter().filter(|p| !p.is_indexed()).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].url.ends_with("/broken"));
    assert_eq!(failed[0].words_indexed, 0);
}

#[tokio::test]
async fn test_robots_checks_share_the_fetch_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nAllow: /")
                .set_delay(Duration::from_millis(200)),
        )
        .expect(10)
        .mount(&server)
        .await;

    // One seed, three children, two grandchildren each: ten robots checks
    mount_page(&server, "/", "Root", &["/a", "/b", "/c"], 1).await;
    for parent in ["a", "b", "c"] {
        let children = [format!("/{}1", parent), format!("/{}2", parent)];
        let links: Vec<&str> = children.iter().map(String::as_str).collect();
        mount_page(&server, &format!("/{}", parent), "Child", &links, 1).await;
        for child in &children {
            mount_page(&server, child, "Grandchild", &[], 1).await;
        }
    }

    let start = Instant::now();
    let totals = test_crawler(3, 1).start_crawl(&seed(&server)).await;
    let elapsed = start.elapsed();

    assert_eq!(totals.sites_indexed, 10);
    // With a single token the delayed robots.txt responses cannot overlap
    assert!(
        elapsed >= Duration::from_millis(2000),
        "robots checks overlapped: crawl took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_single_token_still_crawls_every_page() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;

    mount_page(&server, "/", "Root", &["/p1", "/p2", "/p3", "/p4", "/p5"], 1).await;
    for page in ["/p1", "/p2", "/p3", "/p4", "/p5"] {
        mount_page(&server, page, "Leaf", &[], 1).await;
    }

    let totals = test_crawler(3, 1).start_crawl(&seed(&server)).await;
    assert_eq!(totals.sites_indexed, 6);
}

#[tokio::test]
async fn test_each_crawl_starts_with_an_empty_seen_set() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount_page(&server, "/", "Root", &[], 2).await;

    let crawler = test_crawler(3, 5);
    assert_eq!(crawler.start_crawl(&seed(&server)).await.sites_indexed, 1);
    assert_eq!(crawler.start_crawl(&seed(&server)).await.sites_indexed, 1);
}

#[tokio::test]
async fn test_crawls_share_one_index() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    for server in [&first, &second] {
        mount_robots(server, "User-agent: *\nAllow: /").await;
    }
    mount_page(&first, "/", "Shared First", &[], 1).await;
    mount_page(&second, "/", "Shared Shared Second", &[], 1).await;

    let index = Arc::new(InvertedIndex::new());
    let crawler = Crawler::new(test_config(3, 5), Arc::clone(&index)).unwrap();

    let (seed_first, seed_second) = (seed(&first), seed(&second));
    let (a, b) = tokio::join!(crawler.start_crawl(&seed_first), crawler.start_crawl(&seed_second));
    assert_eq!(a.sites_indexed + b.sites_indexed, 2);

    assert_eq!(
        search(&index, "shared"),
        Some(vec![
            RankedEntry::new("Shared Shared Second", 2),
            RankedEntry::new("Shared First", 1),
        ])
    );
}

#[tokio::test]
async fn test_unresolvable_seed_crawls_nothing() {
    let report = test_crawler(3, 5).crawl("not a url").await;
    assert!(report.pages.is_empty());
}
