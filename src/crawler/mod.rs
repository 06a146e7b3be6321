//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing into title, words and links
//! - Per-crawl scheduling: seen set, depth budget and fetch tokens
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{CrawlAggregate, CrawlReport, Crawler, PageResult};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{extract_links, extract_title, extract_words, parse_page, PageContent};
pub use scheduler::{CrawlTask, Scheduler};
