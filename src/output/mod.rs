//! Output module for printing crawl and search results
//!
//! This module handles:
//! - Per-page crawl summaries with their totals
//! - Ranked search result listings

mod summary;

pub use summary::{
    print_crawl_summary, print_search_results, render_crawl_summary, render_search_results,
};
