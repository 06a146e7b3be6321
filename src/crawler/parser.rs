//! HTML content extraction
//!
//! This module parses a page body once and pulls out:
//! - The page title (first `<title>` element)
//! - Every `<a href>` value, unresolved, in document order
//! - The whitespace-delimited words of all text outside `<script>` elements

use scraper::{Html, Node, Selector};

/// Extracted content of one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Text of the first `<title>` element, or empty
    pub title: String,

    /// Raw word tokens in document order, original case
    pub words: Vec<String>,

    /// Raw `href` values in document order
    pub links: Vec<String>,
}

/// Parses a page body into its title, words and links
///
/// HTML parsing is error tolerant: malformed or empty input yields whatever
/// content could be recovered, never an error.
///
/// # Example
///
/// ```
/// use sumi_index::crawler::parse_page;
///
/// let page = parse_page(r#"<title>Home</title><a href="/next">Next page</a>"#);
/// assert_eq!(page.title, "Home");
/// assert_eq!(page.links, vec!["/next"]);
/// assert_eq!(page.words, vec!["Home", "Next", "page"]);
/// ```
pub fn parse_page(body: &str) -> PageContent {
    let document = Html::parse_document(body);

    PageContent {
        title: title_of(&document),
        words: words_of(&document),
        links: links_of(&document),
    }
}

/// Extracts the page title from an HTML body
pub fn extract_title(body: &str) -> String {
    title_of(&Html::parse_document(body))
}

/// Extracts every anchor `href` from an HTML body
pub fn extract_links(body: &str) -> Vec<String> {
    links_of(&Html::parse_document(body))
}

/// Extracts the visible word tokens from an HTML body
pub fn extract_words(body: &str) -> Vec<String> {
    words_of(&Html::parse_document(body))
}

fn title_of(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default()
}

fn links_of(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

fn words_of(document: &Html) -> Vec<String> {
    let mut words = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let in_script = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|element| element.name() == "script");
        if in_script {
            continue;
        }

        words.extend(text.split_whitespace().map(str::to_string));
    }

    words
}
