use crate::error::{Error, Result};
use reqwest::{header, Client, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// HTTP fetcher with retry logic and a page size cap
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    initial_backoff: Duration,
    max_page_size: usize,
}

#[derive(Debug)]
pub struct FetchResult {
    pub content: String,
    pub content_type: Option<String>,
}

impl Fetcher {
    pub fn new(user_agent: String, max_page_size: usize) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_page_size,
        })
    }

    /// Fetch a URL with retry logic and exponential backoff
    pub async fn fetch(&self, url: &str) -> Result<FetchResult> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match self.fetch_once(url).await {
                Ok(result) => return Ok(result),
                Err(e) if retries < self.max_retries && Self::is_retryable(&e) => {
                    retries += 1;
                    warn!(
                        "Fetch failed (attempt {}/{}): {}. Retrying in {:?}",
                        retries, self.max_retries, e, backoff
                    );
                    sleep(backoff).await;
                    backoff *= 2; // Exponential backoff
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<FetchResult> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("HTTP {}", response.status())));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        // Recipe pages should be HTML; some servers mislabel, so warn only
        if let Some(ref ct) = content_type {
            let ct_lower = ct.to_lowercase();
            let valid_types = ["text/html", "application/xhtml+xml", "text/plain"];

            if !valid_types
                .iter()
                .any(|&valid_type| ct_lower.starts_with(valid_type))
            {
                warn!("Unexpected content type: {} for {}", ct, url);
            }
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_page_size as u64 {
                return Err(Error::Validation(format!(
                    "Page size {} exceeds maximum {}",
                    content_length, self.max_page_size
                )));
            }
        }

        let content = self.read_with_limit(response).await?;

        Ok(FetchResult {
            content,
            content_type,
        })
    }

    async fn read_with_limit(&self, response: Response) -> Result<String> {
        let bytes = response.bytes().await?;

        if bytes.len() > self.max_page_size {
            return Err(Error::Validation(format!(
                "Page size {} exceeds maximum {}",
                bytes.len(),
                self.max_page_size
            )));
        }

        let content = String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Fetch(format!("Invalid UTF-8 in response: {e}")))?;

        Ok(content)
    }

    fn is_retryable(error: &Error) -> bool {
        match error {
            Error::Http(e) => {
                // Retry on network errors, timeouts, server errors
                e.is_timeout() || e.is_connect() || e.is_request()
            }
            _ => false,
        }
    }
}

/// Rate limiter for respecting crawl delays
pub struct RateLimiter {
    delay: Duration,
    last_request: tokio::sync::Mutex<Option<tokio::time::Instant>>,
}

impl RateLimiter {
    pub fn new(requests_per_second: u64) -> Self {
        let delay = Duration::from_millis(1000 / requests_per_second.max(1));
        Self {
            delay,
            last_request: tokio::sync::Mutex::new(None),
        }
    }

    /// Wait if necessary to respect rate limit
    pub async fn wait(&self) {
        // Calculate wait time inside lock scope, then release lock before sleeping
        let wait_time = {
            let last = self.last_request.lock().await;

            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                if elapsed < self.delay {
                    Some(self.delay - elapsed)
                } else {
                    None
                }
            } else {
                None
            }
        }; // Lock released here

        // Sleep outside lock scope to avoid blocking other requests
        if let Some(wait) = wait_time {
            debug!("Rate limiting: waiting {:?}", wait);
            sleep(wait).await;
        }

        // Re-acquire lock only to update timestamp
        let mut last = self.last_request.lock().await;
        *last = Some(tokio::time::Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter() {
        let limiter = RateLimiter::new(2); // 2 requests per second

        let start = tokio::time::Instant::now();
        limiter.wait().await; // First request - no wait
        limiter.wait().await; // Second request - should wait ~500ms
        let elapsed = start.elapsed();

        // Should take at least 500ms for the second request
        assert!(elapsed >= Duration::from_millis(400));
    }

    #[test]
    fn test_fetcher_creation() {
        let fetcher = Fetcher::new("TestBot/1.0".to_string(), 5_242_880);
        assert!(fetcher.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_surfaces_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = Fetcher::new("TestBot/1.0".to_string(), 5_242_880).unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.url())).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(Error::Fetch(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_pages() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/big")
            .with_status(200)
            .with_body("x".repeat(128))
            .create_async()
            .await;

        let fetcher = Fetcher::new("TestBot/1.0".to_string(), 64).unwrap();
        let result = fetcher.fetch(&format!("{}/big", server.url())).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
