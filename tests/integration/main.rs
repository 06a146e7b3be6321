//! Integration tests for the crawl engine and the HTTP API

mod api_tests;
mod crawl_tests;
mod support;
