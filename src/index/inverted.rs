use crate::index::PageWordCounts;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Postings = HashMap<String, usize>;

/// Process-wide inverted index: word → (page title → count)
///
/// One index is shared by every crawl and every search for the life of the
/// process. Entries are only ever added through [`merge`](Self::merge) and only
/// removed all at once through [`reset`](Self::reset). Every stored count is at
/// least 1.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    words: RwLock<HashMap<String, Postings>>,
}

impl InvertedIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one page's word counts under its title
    ///
    /// For each word the posting list is created if needed and the count for
    /// `title` is set, replacing any earlier count for the same title. Each
    /// word is updated inside a single write-locked section.
    pub fn merge(&self, counts: &PageWordCounts, title: &str) {
        for (word, &count) in counts {
            if count == 0 {
                continue;
            }

            let mut words = self.write();
            words
                .entry(word.clone())
                .or_default()
                .insert(title.to_string(), count);
        }
    }

    /// Removes every entry from the index
    pub fn reset(&self) {
        let mut words = self.write();
        *words = HashMap::new();
    }

    /// Returns a snapshot of the postings for `word`
    ///
    /// `None` when the word has never been indexed since the last reset.
    pub fn postings(&self, word: &str) -> Option<Vec<(String, usize)>> {
        let words = self.read();
        words.get(word).map(|titles| {
            titles
                .iter()
                .map(|(title, count)| (title.clone(), *count))
                .collect()
        })
    }

    /// Returns the count stored for `word` under `title`
    pub fn count(&self, word: &str, title: &str) -> Option<usize> {
        self.read().get(word)?.get(title).copied()
    }

    /// Number of distinct words in the index
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns whether the index holds no words
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a posting half-written, so
    // poisoned guards are still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Postings>> {
        self.words.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Postings>> {
        self.words.write().unwrap_or_else(PoisonError::into_inner)
    }
}
