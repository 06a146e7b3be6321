//! Plain-text summaries for the command line

use crate::crawler::CrawlReport;
use crate::index::RankedEntry;
use std::fmt::Write;

/// Renders a crawl report: one line per page followed by the totals
pub fn render_crawl_summary(report: &CrawlReport) -> String {
    let mut out = String::new();
    let totals = report.aggregate();
    let failed = report.pages.iter().filter(|p| !p.is_indexed()).count();

    let _ = writeln!(out, "=== Crawl Summary ===\n");
    let _ = writeln!(out, "Seed: {}", report.seed);
    let _ = writeln!(out, "Pages scheduled: {}", report.pages.len());
    let _ = writeln!(out);

    if !report.pages.is_empty() {
        let _ = writeln!(out, "Pages:");
        let mut pages: Vec<_> = report.pages.iter().collect();
        pages.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.url.cmp(&b.url)));

        for page in pages {
            if page.is_indexed() {
                let title = if page.title.is_empty() {
                    "(untitled)"
                } else {
                    page.title.as_str()
                };
                let _ = writeln!(
                    out,
                    "  [{}] {} - {} ({} words)",
                    page.depth, page.url, title, page.words_indexed
                );
            } else {
                let _ = writeln!(out, "  [{}] {} - failed", page.depth, page.url);
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Totals:");
    let _ = writeln!(out, "  Sites indexed: {}", totals.sites_indexed);
    let _ = writeln!(out, "  Words indexed: {}", totals.words_indexed);
    if failed > 0 {
        let _ = writeln!(out, "  Failed pages: {}", failed);
    }

    out
}

/// Prints a crawl report to stdout
pub fn print_crawl_summary(report: &CrawlReport) {
    print!("{}", render_crawl_summary(report));
}

/// Renders ranked results for `word`
pub fn render_search_results(word: &str, results: Option<&[RankedEntry]>) -> String {
    let mut out = String::new();

    match results {
        Some(entries) if !entries.is_empty() => {
            let _ = writeln!(out, "Results for {:?}:", word);
            for (rank, entry) in entries.iter().enumerate() {
                let _ = writeln!(out, "  {}. {} ({})", rank + 1, entry.title, entry.count);
            }
        }
        _ => {
            let _ = writeln!(out, "No results for {:?}", word);
        }
    }

    out
}

/// Prints ranked results for `word` to stdout
pub fn print_search_results(word: &str, results: Option<&[RankedEntry]>) {
    print!("{}", render_search_results(word, results));
}
