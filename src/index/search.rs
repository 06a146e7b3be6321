use crate::index::InvertedIndex;
use serde::Serialize;

/// One title in a ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Count")]
    pub count: usize,
}

impl RankedEntry {
    pub fn new(title: impl Into<String>, count: usize) -> Self {
        Self {
            title: title.into(),
            count,
        }
    }
}

/// Looks up a word and ranks the titles it appears in
///
/// The word is expected to already be lowercase. Titles are ordered by count,
/// highest first; titles with equal counts are ordered by title, also in
/// descending order.
///
/// # Returns
///
/// * `Some(entries)` - The ranked titles for an indexed word
/// * `None` - The word is not in the index
pub fn search(index: &InvertedIndex, word: &str) -> Option<Vec<RankedEntry>> {
    let mut entries: Vec<RankedEntry> = index
        .postings(word)?
        .into_iter()
        .map(|(title, count)| RankedEntry { title, count })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.title.cmp(&a.title))
    });

    Some(entries)
}
