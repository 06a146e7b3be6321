//! Sumi-Index: a concurrent crawler and in-memory search index
//!
//! This crate crawls web pages breadth-first from a seed URL, respecting
//! robots.txt, and builds a process-wide inverted word index that can be
//! queried for ranked results while crawls are still running.

pub mod config;
pub mod crawler;
pub mod index;
pub mod output;
pub mod robots;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Index operations
#[derive(Debug, Error)]
pub enum SumiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Robots.txt error: {0}")]
    Robots(#[from] robots::RobotsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL (no scheme or host): {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sumi-Index operations
pub type Result<T> = std::result::Result<T, SumiError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlAggregate, CrawlReport, Crawler};
pub use index::{search, InvertedIndex, RankedEntry};
pub use url::resolve_url;
