use anyhow::Result;
use clap::builder::PossibleValue;
use clap::{Parser, Subcommand};
use proxy_tools::{
    initialize_logging, parse_log_level,
    proxy::{normalizer::DEFAULT_PROXY_FILE, scraper::DEFAULT_OUTPUT_FILE, source::DEFAULT_ENDPOINT},
    ProxyNormalizer, ProxyScraper, ScraperConfig,
};
use std::path::PathBuf;
use std::time::Duration;

/// Proxy list normalizer and paginated proxy-list scraper
#[derive(Parser)]
#[command(name = "proxy-tools")]
#[command(about = "Proxy list normalizer and paginated proxy-list scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level for application output
    #[arg(
        long = "log",
        global = true,
        default_value = "info",
        value_parser([
            PossibleValue::new("off"),
            PossibleValue::new("error"),
            PossibleValue::new("warn"),
            PossibleValue::new("info"),
            PossibleValue::new("debug"),
            PossibleValue::new("trace"),
        ])
    )]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Prefix every line of a proxy list with http:// unless it has a scheme
    Normalize {
        /// Proxy list file, rewritten in place
        #[arg(default_value = DEFAULT_PROXY_FILE)]
        file: PathBuf,
    },
    /// Collect unique proxies from the paginated listing API
    Scrape {
        /// Output file for the sorted proxy list
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
        /// Number of pages to fetch
        #[arg(long, default_value = "24", value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
        /// Entries requested per page
        #[arg(long, default_value = "500", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,
        /// Timeout in seconds for each request
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,
        /// Attempts per page when the server answers 503
        #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..))]
        max_attempts: u32,
        /// Listing endpoint
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        url: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = parse_log_level(&cli.log_level)?;
    initialize_logging(log_level)?;

    match cli.command {
        Commands::Normalize { file } => {
            ProxyNormalizer::normalize_file(&file)?;
        }
        Commands::Scrape {
            output,
            pages,
            page_size,
            timeout,
            max_attempts,
            url,
        } => {
            let config = ScraperConfig::new()
                .with_endpoint(url)
                .with_total_pages(pages)
                .with_page_size(page_size)
                .with_timeout(Duration::from_secs(timeout))
                .with_max_attempts(max_attempts)
                .with_output(output);

            let scraper = ProxyScraper::with_config(config)?;
            scraper.run().await?;
        }
    }

    Ok(())
}
