//! Proxy Tools - Proxy List Normalizer and Scraper
//!
//! Two small utilities: one rewrites a proxy list so every line has a scheme,
//! the other collects unique proxies from a paginated listing API.

pub mod proxy;

pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;

/// Set up stderr logging at the given verbosity
pub fn initialize_logging(log_level: log::LevelFilter) -> Result<()> {
    stderrlog::new()
        .module(module_path!())
        .show_module_names(true)
        .verbosity(log_level)
        .init()?;
    Ok(())
}

/// Map a `--log` value onto a level filter
pub fn parse_log_level(level: &str) -> Result<log::LevelFilter> {
    match level {
        "off" => Ok(log::LevelFilter::Off),
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        other => Err(anyhow::anyhow!("Invalid log level: {}", other)),
    }
}
