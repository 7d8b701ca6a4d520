//! Proxy module for normalizing and scraping proxy lists
//!
//! This module provides functionality for:
//! - Normalizing proxy list files so every line carries a scheme
//! - Fetching a paginated proxy listing with retry on 503
//! - Writing the deduplicated, sorted result to a file

pub mod models;
pub mod normalizer;
pub mod scraper;
pub mod source;

pub use models::{ListingEntry, ListingPage};
pub use normalizer::{NormalizeSummary, ProxyNormalizer};
pub use scraper::{write_proxy_list, ProxyScraper, ScraperConfig};
pub use source::{FetchError, GeonodeSource, PageSource};
