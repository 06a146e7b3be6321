//! URL handling module for Sumi-Index
//!
//! Discovered links are resolved against the page they were found on before
//! they are deduplicated, checked against robots.txt and fetched.

mod normalize;

pub use normalize::resolve_url;
