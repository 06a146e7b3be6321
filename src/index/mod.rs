//! In-memory search index
//!
//! This module holds the process-wide inverted index that every crawl writes
//! into, the word counter that prepares a page for merging, and the ranked
//! lookup served to searchers.

mod counter;
mod inverted;
mod search;

pub use counter::{count_words, PageWordCounts};
pub use inverted::InvertedIndex;
pub use search::{search, RankedEntry};
