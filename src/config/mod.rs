use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub crawler: CrawlerConfig,
    pub search: SearchConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum size of a fetched page in bytes
    pub max_page_size: usize,
    /// Requests per second against a single host
    pub rate_limit: u64,
    /// Maximum pages visited during URL discovery
    pub max_discovery_pages: usize,
    /// Maximum pending URLs in the discovery queue
    pub max_discovery_queue: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default JSON corpus consumed by the search commands
    pub corpus_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum results rendered per query
    pub max_results: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let max_page_size = std::env::var("MAX_PAGE_SIZE")
            .unwrap_or_else(|_| "5242880".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_PAGE_SIZE value".to_string()))?;

        let rate_limit = std::env::var("RATE_LIMIT")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid RATE_LIMIT value".to_string()))?;

        let max_discovery_pages = std::env::var("MAX_DISCOVERY_PAGES")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_DISCOVERY_PAGES value".to_string()))?;

        let max_discovery_queue = std::env::var("MAX_DISCOVERY_QUEUE")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_DISCOVERY_QUEUE value".to_string()))?;

        let corpus_path = std::env::var("CORPUS_PATH")
            .unwrap_or_else(|_| "./data/recipes.json".to_string())
            .into();

        let max_results = std::env::var("MAX_RESULTS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_RESULTS value".to_string()))?;

        Ok(Settings {
            crawler: CrawlerConfig {
                max_page_size,
                rate_limit,
                max_discovery_pages,
                max_discovery_queue,
                user_agent: format!("Forager/{}", env!("CARGO_PKG_VERSION")),
            },
            search: SearchConfig { corpus_path },
            display: DisplayConfig { max_results },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.crawler.rate_limit == 0 {
            return Err(Error::Config("Rate limit must be non-zero".to_string()));
        }

        if self.crawler.max_page_size == 0 {
            return Err(Error::Config("Max page size must be non-zero".to_string()));
        }

        if self.display.max_results == 0 {
            return Err(Error::Config("Max results must be non-zero".to_string()));
        }

        Ok(())
    }
}
