//! Crawler coordinator - main crawl orchestration logic
//!
//! A crawl is a breadth-first traversal from a seed URL:
//! - Link batches are vetted: resolved, deduplicated, depth-checked and
//!   checked against robots.txt
//! - Vetted links are fetched
//! - Robots.txt checks and page fetches draw from one pool of `max_parallel`
//!   tokens, so no more than that many requests are ever in flight
//! - Each fetched page is parsed, its words counted and merged into the index
//! - The page's links come back as the next batch, one level deeper
//!
//! Vetting and fetching both run as tasks in one `JoinSet`. The set doubles as
//! the outstanding-work counter: the crawl is over exactly when it is empty.

use crate::config::{validate_crawler_config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::parser::parse_page;
use crate::crawler::scheduler::{CrawlTask, Scheduler};
use crate::index::{count_words, InvertedIndex};
use crate::robots::PolicyGate;
use crate::url::resolve_url;
use crate::SumiError;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Totals over every page of one crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlAggregate {
    /// Pages fetched and indexed
    #[serde(rename = "SitesIndexed")]
    pub sites_indexed: usize,

    /// Sum of each page's distinct indexed words
    #[serde(rename = "WordsIndexed")]
    pub words_indexed: usize,
}

/// Outcome of one scheduled page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    pub depth: u32,
    pub title: String,
    pub sites_indexed: usize,
    pub words_indexed: usize,
}

impl PageResult {
    fn indexed(task: &CrawlTask, title: String, distinct_words: usize) -> Self {
        Self {
            url: task.uri.clone(),
            depth: task.depth,
            title,
            sites_indexed: 1,
            words_indexed: distinct_words,
        }
    }

    fn failed(task: &CrawlTask) -> Self {
        Self {
            url: task.uri.clone(),
            depth: task.depth,
            title: String::new(),
            sites_indexed: 0,
            words_indexed: 0,
        }
    }

    /// Returns whether the page was fetched and indexed
    pub fn is_indexed(&self) -> bool {
        self.sites_indexed > 0
    }
}

/// Every page result of one crawl, in completion order
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    pub seed: String,
    pub pages: Vec<PageResult>,
}

impl CrawlReport {
    /// Sums the page results
    pub fn aggregate(&self) -> CrawlAggregate {
        self.pages
            .iter()
            .fold(CrawlAggregate::default(), |mut totals, page| {
                totals.sites_indexed += page.sites_indexed;
                totals.words_indexed += page.words_indexed;
                totals
            })
    }
}

/// Links discovered on one page, waiting to be vetted
#[derive(Debug, Clone)]
struct LinkBatch {
    /// URL the links are resolved against
    base: String,
    links: Vec<String>,
    /// Depth the links would be crawled at
    depth: u32,
}

/// What a finished crawl task hands back to the coordinator
enum Completed {
    Vetted(Vec<CrawlTask>),
    Page {
        result: PageResult,
        next: Option<LinkBatch>,
    },
}

/// Crawl engine writing into a shared inverted index
///
/// Cloning is cheap; clones share the HTTP client and the index.
#[derive(Debug, Clone)]
pub struct Crawler {
    config: Arc<CrawlerConfig>,
    client: Client,
    gate: PolicyGate,
    index: Arc<InvertedIndex>,
}

impl Crawler {
    /// Creates a crawler that indexes into `index`
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(SumiError)` - The configuration is out of range or the HTTP
    ///   client could not be built
    pub fn new(config: CrawlerConfig, index: Arc<InvertedIndex>) -> Result<Self, SumiError> {
        validate_crawler_config(&config)?;

        let client = build_http_client(&config.crawler_agent)?;
        let gate = PolicyGate::new(client.clone(), config.crawler_agent.clone());

        Ok(Self {
            config: Arc::new(config),
            client,
            gate,
            index,
        })
    }

    /// Returns the crawler configuration
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Returns the index this crawler writes into
    pub fn index(&self) -> &Arc<InvertedIndex> {
        &self.index
    }

    /// Crawls from `seed` until no reachable, allowed, unseen page within the
    /// depth budget remains
    ///
    /// Individual page failures are recorded as zero-yield results and never
    /// stop the crawl.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use sumi_index::config::CrawlerConfig;
    /// use sumi_index::{Crawler, InvertedIndex};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = CrawlerConfig {
    ///     max_depth: 3,
    ///     max_parallel: 5,
    ///     crawler_agent: "SumiIndex".to_string(),
    /// };
    /// let crawler = Crawler::new(config, Arc::new(InvertedIndex::new()))?;
    /// let report = crawler.crawl("https://example.com/").await;
    /// println!("{:?}", report.aggregate());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, seed: &str) -> CrawlReport {
        tracing::info!(
            "Beginning to index at {} (max depth {}, max parallel {})",
            seed,
            self.config.max_depth,
            self.config.max_parallel
        );
        let start_time = Instant::now();

        let run = Arc::new(CrawlRun {
            crawler: self.clone(),
            scheduler: Scheduler::new(self.config.max_parallel as usize, self.config.max_depth),
        });

        let mut tasks = JoinSet::new();
        tasks.spawn(Arc::clone(&run).vet(LinkBatch {
            base: seed.to_string(),
            links: vec![seed.to_string()],
            depth: 0,
        }));

        let mut pages = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Completed::Vetted(scheduled)) => {
                    for task in scheduled {
                        tasks.spawn(Arc::clone(&run).index_page(task));
                    }
                }
                Ok(Completed::Page { result, next }) => {
                    pages.push(result);
                    if let Some(batch) = next {
                        tasks.spawn(Arc::clone(&run).vet(batch));
                    }
                }
                Err(e) => {
                    tracing::warn!("Crawl task failed: {}", e);
                }
            }
        }

        let report = CrawlReport {
            seed: seed.to_string(),
            pages,
        };
        let totals = report.aggregate();
        tracing::info!(
            "Crawl of {} completed: {} sites, {} words indexed, {} URLs seen in {:?}",
            seed,
            totals.sites_indexed,
            totals.words_indexed,
            run.scheduler.seen_count(),
            start_time.elapsed()
        );

        report
    }

    /// Crawls from `seed` and returns only the totals
    pub async fn start_crawl(&self, seed: &str) -> CrawlAggregate {
        self.crawl(seed).await.aggregate()
    }
}

/// State of one crawl invocation, shared by its tasks
struct CrawlRun {
    crawler: Crawler,
    scheduler: Scheduler,
}

impl CrawlRun {
    /// Turns a batch of raw links into the tasks worth fetching
    async fn vet(self: Arc<Self>, batch: LinkBatch) -> Completed {
        if !self.scheduler.within_depth(batch.depth) {
            tracing::debug!(
                "Not following {} links from {}: max depth reached",
                batch.links.len(),
                batch.base
            );
            return Completed::Vetted(Vec::new());
        }

        let mut scheduled = Vec::new();
        for link in &batch.links {
            let absolute = match resolve_url(link, &batch.base) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Skipping link {:?} on {}: {}", link, batch.base, e);
                    continue;
                }
            };

            // Claimed before the robots check so duplicates cost no round trip
            if !self.scheduler.mark_seen(&absolute) {
                tracing::trace!("Already seen {}, skipping", absolute);
                continue;
            }

            if !self.is_allowed(&absolute).await {
                tracing::debug!("Cannot legally crawl {}", absolute);
                continue;
            }

            tracing::debug!("Added link to crawl: {} (depth {})", absolute, batch.depth);
            scheduled.push(CrawlTask {
                uri: absolute,
                depth: batch.depth,
            });
        }

        Completed::Vetted(scheduled)
    }

    /// Runs the robots.txt check under a fetch token
    async fn is_allowed(&self, url: &str) -> bool {
        let Some(_token) = self.scheduler.acquire().await else {
            return false;
        };
        self.crawler.gate.is_allowed(url).await
    }

    /// Fetches, parses and indexes one page
    async fn index_page(self: Arc<Self>, task: CrawlTask) -> Completed {
        tracing::debug!("Indexing {} at depth {}", task.uri, task.depth);

        // The token covers the network round trip only
        let fetched = {
            let Some(_token) = self.scheduler.acquire().await else {
                return Completed::Page {
                    result: PageResult::failed(&task),
                    next: None,
                };
            };
            fetch_url(&self.crawler.client, &task.uri).await
        };

        let (base, body) = match fetched {
            FetchResult::Fetched {
                final_url,
                status_code,
                body,
            } => {
                if !(200..300).contains(&status_code) {
                    tracing::debug!(
                        "{} answered HTTP {}, indexing its body",
                        task.uri,
                        status_code
                    );
                }
                (final_url, body)
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Fetching {} failed: {}", task.uri, error);
                return Completed::Page {
                    result: PageResult::failed(&task),
                    next: None,
                };
            }
        };

        let page = parse_page(&body);
        let (counts, distinct_words) = count_words(&page.words);
        self.crawler.index.merge(&counts, &page.title);
        tracing::debug!(
            "Total words cached for title {:?}: {}",
            page.title,
            distinct_words
        );

        let next_depth = task.depth + 1;
        let next = if self.scheduler.within_depth(next_depth) && !page.links.is_empty() {
            Some(LinkBatch {
                base,
                links: page.links,
                depth: next_depth,
            })
        } else {
            None
        };

        Completed::Page {
            result: PageResult::indexed(&task, page.title, distinct_words),
            next,
        }
    }
}
