// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option has a default equal to the values the scraper has always
// used, so running the binary with no arguments crawls the q.sa3dny.net
// sitemap into ./q_sa3dny_net exactly as before.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_INDEX_URL, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, DEFAULT_OUTPUT_DIR,
};

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-scrape",
    version,
    about = "Walk a sitemap index and scrape question titles into batched TSV files",
    long_about = "sitemap-scrape reads a sitemap index, fetches every child sitemap, visits each \
                  listed page with a small random delay and writes the page URL plus its question \
                  title to numbered tab-separated files, one file per batch."
)]
pub struct Cli {
    /// Sitemap index URL to start from
    #[arg(default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Directory the batch files are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum number of pages per batch file
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Shortest random pause before each page request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MIN_DELAY_MS)]
    pub min_delay_ms: u64,

    /// Longest random pause before each page request, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_MS)]
    pub max_delay_ms: u64,

    /// Pages fetched at the same time (default: CPU cores - 1, at least 1)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// CSS selector chain for the scraped field, outermost first.
    ///
    /// Repeat the flag once per step, e.g.
    /// --selector div.qa-main-heading --selector h1 --selector a --selector 'span[itemprop="name"]'
    #[arg(long = "selector", value_name = "CSS")]
    pub selectors: Vec<String>,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
