//! Paginated proxy listing source
//!
//! `GeonodeSource` talks to the geonode proxy-list API. Everything else in the
//! crate only sees the `PageSource` trait.

use crate::proxy::models::ListingPage;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

/// Default listing endpoint
pub const DEFAULT_ENDPOINT: &str = "https://proxylist.geonode.com/api/proxy-list";

/// Default user agent for HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("proxy-tools/", env!("CARGO_PKG_VERSION"));

/// Why a single page fetch failed
#[derive(Debug)]
pub enum FetchError {
    /// The server answered with a non-success status
    Status(StatusCode),
    /// Connection, timeout, DNS or TLS failure
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// The body was not a listing page
    Decode(Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    /// Only 503 Service Unavailable is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Status(status) if *status == StatusCode::SERVICE_UNAVAILABLE)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(status) => write!(f, "HTTP status {}", status),
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Decode(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status)
        } else if err.is_decode() {
            FetchError::Decode(Box::new(err))
        } else {
            FetchError::Transport(Box::new(err))
        }
    }
}

/// A listing that can be fetched one page at a time
#[async_trait]
pub trait PageSource {
    async fn fetch_page(&self, page: u32) -> std::result::Result<ListingPage, FetchError>;
}

/// Client for the geonode proxy-list API
pub struct GeonodeSource {
    client: Client,
    endpoint: String,
    page_size: u32,
}

impl GeonodeSource {
    pub fn new(endpoint: &str, page_size: u32, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            page_size,
        })
    }
}

#[async_trait]
impl PageSource for GeonodeSource {
    async fn fetch_page(&self, page: u32) -> std::result::Result<ListingPage, FetchError> {
        log::debug!("GET {} page={} limit={}", self.endpoint, page, self.page_size);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("limit", self.page_size.to_string()),
                ("page", page.to_string()),
                ("sort_by", "lastChecked".to_string()),
                ("sort_type", "desc".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(Box::new(e)))
    }
}
