// src/config.rs
// =============================================================================
// Run configuration.
//
// Built from the command line, validated once, then passed by reference to
// the pipeline. Defaults reproduce the original hard-coded behaviour.
// =============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use url::Url;

use crate::cli::Cli;
use crate::crawl::{default_worker_count, CrawlOptions, Jitter};
use crate::extract::ExtractionChain;

pub const DEFAULT_INDEX_URL: &str = "https://q.sa3dny.net/sitemap-index.xml";
pub const DEFAULT_OUTPUT_DIR: &str = "q_sa3dny_net";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_MIN_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct Config {
    pub index_url: String,
    pub output_dir: PathBuf,
    pub batch_size: usize,
    pub crawl: CrawlOptions,
    /// None means requests may hang forever
    pub timeout: Option<Duration>,
    /// Draw a progress bar while each batch is crawled
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            batch_size: DEFAULT_BATCH_SIZE,
            crawl: CrawlOptions::default(),
            timeout: None,
            progress: true,
        }
    }
}

impl Config {
    /// Turns parsed arguments into a validated configuration.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let chain = if cli.selectors.is_empty() {
            ExtractionChain::default()
        } else {
            ExtractionChain::parse(cli.selectors.as_slice())?
        };

        let config = Self {
            index_url: cli.index_url.clone(),
            output_dir: cli.output_dir.clone(),
            batch_size: cli.batch_size,
            crawl: CrawlOptions {
                workers: cli.workers.unwrap_or_else(default_worker_count),
                jitter: Jitter::new(
                    Duration::from_millis(cli.min_delay_ms),
                    Duration::from_millis(cli.max_delay_ms),
                ),
                chain: Arc::new(chain),
            },
            timeout: cli.timeout_secs.map(Duration::from_secs),
            progress: !cli.json,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.index_url)
            .with_context(|| format!("Invalid sitemap index URL '{}'", self.index_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!("Sitemap index URL must be http or https, got '{}'", url.scheme());
        }

        if self.batch_size == 0 {
            bail!("--batch-size must be at least 1");
        }
        if self.crawl.workers == 0 {
            bail!("--workers must be at least 1");
        }
        if self.crawl.jitter.min > self.crawl.jitter.max {
            bail!(
                "--min-delay-ms ({}) is larger than --max-delay-ms ({})",
                self.crawl.jitter.min.as_millis(),
                self.crawl.jitter.max.as_millis()
            );
        }
        if self.timeout == Some(Duration::ZERO) {
            bail!("--timeout-secs must be at least 1");
        }

        Ok(())
    }

    /// One HTTP client for the whole run. No default headers, no cookies.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().context("Failed to create HTTP client")
    }
}
