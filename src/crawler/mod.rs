// Crawling pipeline: URL discovery, rate-limited fetching and JSON-LD
// recipe extraction. Produces plain recipe records; indexing them is the
// search engine's job.

pub mod discovery;
pub mod extract;
pub mod fetcher;

use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::store::Recipe;
use chrono::{DateTime, Utc};
use fetcher::{Fetcher, RateLimiter};
use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};

/// Outcome of one URL attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// A recipe was extracted
    Scraped,
    /// Page fetched but carried no recipe structured data
    NoRecipeData,
    /// Fetch failed after retries
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct UrlAttempt {
    pub url: String,
    pub at: DateTime<Utc>,
    pub outcome: AttemptOutcome,
}

/// Everything a crawl run produced, recipes plus per-URL bookkeeping.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub recipes: Vec<Recipe>,
    pub attempts: Vec<UrlAttempt>,
}

impl CrawlReport {
    pub fn attempted(&self) -> usize {
        self.attempts.len()
    }

    pub fn successful(&self) -> usize {
        self.count(|o| matches!(o, AttemptOutcome::Scraped))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, AttemptOutcome::NoRecipeData))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, AttemptOutcome::Failed(_)))
    }

    pub fn success_rate(&self) -> f64 {
        if self.attempts.is_empty() {
            return 0.0;
        }
        self.successful() as f64 / self.attempted() as f64 * 100.0
    }

    fn count(&self, matcher: impl Fn(&AttemptOutcome) -> bool) -> usize {
        self.attempts.iter().filter(|a| matcher(&a.outcome)).count()
    }

    fn record(&mut self, url: &str, outcome: AttemptOutcome) {
        self.attempts.push(UrlAttempt {
            url: url.to_string(),
            at: Utc::now(),
            outcome,
        });
    }
}

/// Main crawler that orchestrates discovery, fetching and extraction
pub struct Crawler {
    fetcher: Fetcher,
    limiter: RateLimiter,
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.user_agent.clone(), config.max_page_size)?;
        let limiter = RateLimiter::new(config.rate_limit);

        Ok(Self {
            fetcher,
            limiter,
            config,
        })
    }

    /// Crawl a list of recipe URLs, collecting whatever recipes their
    /// pages carry. Individual failures are recorded, never fatal.
    pub async fn crawl(&self, urls: &[String]) -> CrawlReport {
        let mut report = CrawlReport::default();

        for (i, url) in urls.iter().enumerate() {
            info!("Processing recipe {}/{}: {}", i + 1, urls.len(), url);
            self.limiter.wait().await;

            match self.fetcher.fetch(url).await {
                Ok(result) => match extract::extract_recipe(&result.content, url) {
                    Some(recipe) => {
                        info!("Extracted recipe: {}", recipe.title);
                        report.recipes.push(recipe);
                        report.record(url, AttemptOutcome::Scraped);
                    }
                    None => {
                        warn!("No recipe structured data found at {}", url);
                        report.record(url, AttemptOutcome::NoRecipeData);
                    }
                },
                Err(e) => {
                    warn!("Failed to fetch {}: {}", url, e);
                    report.record(url, AttemptOutcome::Failed(e.to_string()));
                }
            }
        }

        info!(
            "Crawl completed: {} attempted, {} successful, {} skipped, {} failed",
            report.attempted(),
            report.successful(),
            report.skipped(),
            report.failed()
        );

        report
    }

    /// Breadth-first discovery of recipe URLs from a category page. Bounded
    /// by the configured page and queue limits to avoid wandering the whole
    /// site.
    pub async fn discover(&self, base_url: &str, limit: usize) -> Result<Vec<String>> {
        let mut discovered: Vec<String> = Vec::new();
        let mut found: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::from([base_url.to_string()]);

        info!("Starting discovery from {}", base_url);

        while let Some(current) = queue.pop_front() {
            if discovered.len() >= limit {
                break;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if visited.len() > self.config.max_discovery_pages {
                info!(
                    "Reached discovery limit of {} pages",
                    self.config.max_discovery_pages
                );
                break;
            }

            self.limiter.wait().await;

            let page = match self.fetcher.fetch(&current).await {
                Ok(result) => result.content,
                Err(e) => {
                    warn!("Failed to fetch {}: {}", current, e);
                    continue;
                }
            };

            for link in discovery::discover_links(&current, &page) {
                if discovery::is_recipe_url(&link) {
                    if found.insert(link.clone()) {
                        info!("Found recipe URL: {}", link);
                        discovered.push(link);
                        if discovered.len() >= limit {
                            break;
                        }
                    }
                } else if discovery::same_domain(&link, base_url)
                    && discovery::is_content_page(&link)
                    && !visited.contains(&link)
                    && queue.len() < self.config.max_discovery_queue
                {
                    queue.push_back(link);
                }
            }
        }

        info!("Discovery completed: {} recipe URLs", discovered.len());
        Ok(discovered)
    }
}
