//! Proxy scraper module for collecting proxies from a paginated listing
//!
//! Pages are fetched strictly one after another. A page answering 503 is
//! retried with exponential backoff; any other failure skips the page and the
//! run moves on. The unique, sorted result is written once at the end.

use crate::proxy::source::{GeonodeSource, PageSource, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};
use crate::Result;
use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Number of listing pages to walk
const DEFAULT_TOTAL_PAGES: u32 = 24;

/// Entries requested per page
const DEFAULT_PAGE_SIZE: u32 = 500;

/// Default timeout for each page request in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Attempts per page before giving up on repeated 503s
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// First backoff delay; doubles with each attempt
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Default output file
pub const DEFAULT_OUTPUT_FILE: &str = "proxies.txt";

/// Configuration for proxy scraper
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Listing endpoint
    pub endpoint: String,
    /// Pages `1..=total_pages` are fetched
    pub total_pages: u32,
    /// Entries per page
    pub page_size: u32,
    /// Timeout for each request
    pub timeout: Duration,
    /// Attempts per page, counting the first
    pub max_attempts: u32,
    /// Backoff before retry `n` is `backoff_base * 2^n`
    pub backoff_base: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Where the sorted list is written
    pub output: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            total_pages: DEFAULT_TOTAL_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    /// Delay before retrying after the given zero-based attempt
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Scraper walking a paginated proxy listing
pub struct ProxyScraper<S> {
    config: ScraperConfig,
    source: S,
}

impl ProxyScraper<GeonodeSource> {
    /// Create a scraper against the configured HTTP endpoint
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let source = GeonodeSource::new(
            &config.endpoint,
            config.page_size,
            config.timeout,
            &config.user_agent,
        )?;
        Ok(Self { config, source })
    }
}

impl<S: PageSource> ProxyScraper<S> {
    /// Create a scraper over any page source
    pub fn with_source(config: ScraperConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one page, retrying on 503
    ///
    /// Never fails: a page that cannot be fetched yields no addresses.
    pub async fn fetch_page_with_retry(&self, page: u32) -> Vec<String> {
        let mut attempt = 0;

        while attempt < self.config.max_attempts {
            match self.source.fetch_page(page).await {
                Ok(listing) => return listing.addresses(),
                Err(e) if e.is_retryable() => {
                    let wait = self.config.backoff_delay(attempt);
                    log::warn!(
                        "503 Server Unavailable on page {}, retrying in {:?}...",
                        page,
                        wait
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::error!("Error on page {}: {}", page, e);
                    return Vec::new();
                }
            }
        }

        log::error!(
            "Failed to fetch page {} after {} attempts.",
            page,
            self.config.max_attempts
        );
        Vec::new()
    }

    /// Walk every page and collect the unique addresses
    pub async fn scrape(&self) -> BTreeSet<String> {
        let mut all_proxies = BTreeSet::new();

        for page in 1..=self.config.total_pages {
            log::info!("Fetching page {}...", page);
            let proxies = self.fetch_page_with_retry(page).await;

            let before = all_proxies.len();
            all_proxies.extend(proxies);
            log::info!("Added {} new proxies.", all_proxies.len() - before);
        }

        all_proxies
    }

    /// Scrape all pages and write the result to the configured output
    pub async fn run(&self) -> Result<BTreeSet<String>> {
        let all_proxies = self.scrape().await;
        write_proxy_list(&self.config.output, &all_proxies)?;

        log::info!(
            "Scraped {} unique proxies into {}",
            all_proxies.len(),
            self.config.output.display()
        );
        Ok(all_proxies)
    }
}

/// Write proxies one per line, replacing the file
pub fn write_proxy_list<P: AsRef<Path>>(path: P, proxies: &BTreeSet<String>) -> Result<()> {
    let path = path.as_ref();
    let content: String = proxies.iter().map(|p| format!("{}\n", p)).collect();

    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
