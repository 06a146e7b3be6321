//! Robots.txt handling module
//!
//! This module fetches and evaluates robots.txt files to decide whether a URL
//! may be crawled. Every failure to obtain usable rules fails closed.

mod gate;
mod parser;

pub use gate::{robots_url, PolicyGate};
pub use parser::ParsedRobots;

use thiserror::Error;

/// Reasons a robots.txt file could not be turned into rules
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Robots.txt at {url} could not be parsed: {message}")]
    Parse { url: String, message: String },

    #[error("Cannot derive robots.txt location from {0}")]
    InvalidUrl(String),
}
