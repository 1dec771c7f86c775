// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Install the tracing subscriber (log lines go to stdout)
// 3. Build the run configuration and HTTP client
// 4. Run the crawl pipeline and print a summary
// 5. Exit with proper code (0 = finished, 2 = fatal error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - validated run settings
mod crawl;    // src/crawl/ - worker pool and per-page fetch
mod error;    // src/error.rs - typed sitemap/page errors
mod extract;  // src/extract.rs - question title extraction
mod output;   // src/output/ - batch files and run summary
mod pipeline; // src/pipeline.rs - the crawl loop
mod sitemap;  // src/sitemap/ - sitemap fetching and parsing

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = crawl finished (individual pages or sitemaps may still have failed)
//   Err   = fatal error: bad arguments, unreachable index, unwritable output
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_cli(&cli)?;
    let client = config.http_client()?;

    if !cli.json {
        println!("🔍 Reading sitemap index: {}", config.index_url);
        println!("📁 Writing batches to: {}", config.output_dir.display());
    }

    let summary = pipeline::run(&client, &config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print_table();
    }

    Ok(0)
}
