use std::collections::HashMap;

/// Lowercase word to number of occurrences on one page
pub type PageWordCounts = HashMap<String, usize>;

/// Reduces raw page tokens to per-word frequencies
///
/// Each token is lowercased and kept only if it then consists solely of the
/// letters `a` to `z`, which drops punctuation-attached tokens such as
/// `"Test,"`, numbers and contraction remnants.
///
/// # Returns
///
/// The frequency map and the number of distinct words it holds. The distinct
/// count is what a page contributes to the words-indexed total.
///
/// # Examples
///
/// ```
/// use sumi_index::index::count_words;
///
/// let (counts, distinct) = count_words(["a", "A", "b"]);
/// assert_eq!(counts["a"], 2);
/// assert_eq!(distinct, 2);
/// ```
pub fn count_words<I, S>(tokens: I) -> (PageWordCounts, usize)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = PageWordCounts::new();

    for token in tokens {
        let word = token.as_ref().to_lowercase();
        if is_indexable(&word) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let distinct = counts.len();
    (counts, distinct)
}

fn is_indexable(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}
