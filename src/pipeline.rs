// src/pipeline.rs
// =============================================================================
// The crawl loop.
//
// index URL -> child sitemaps -> page URLs -> batches -> titles -> files
//
// Stages run one after another with no feedback:
// 1. Resolve the index (a failure here ends the run)
// 2. For each child sitemap, in order: resolve its pages (a failure here
//    just means "no pages"), split them into batches
// 3. For each batch: crawl it with the worker pool, wait for every page,
//    write the batch file, move on
//
// The batch number lives in this function and is threaded through
// chunk_batches, so numbering continues across sitemaps.
// =============================================================================

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::crawl::{chunk_batches, crawl_batch};
use crate::output::{write_batch, RunSummary};
use crate::sitemap::{fetch_sitemap, fetch_sitemap_strict};

/// Runs the whole crawl described by `config`.
pub async fn run(client: &Client, config: &Config) -> Result<RunSummary> {
    let sitemaps = fetch_sitemap_strict(client, &config.index_url)
        .await
        .with_context(|| format!("Failed to resolve sitemap index {}", config.index_url))?;

    let mut summary = RunSummary {
        sitemaps: sitemaps.len(),
        ..RunSummary::default()
    };

    if sitemaps.is_empty() {
        warn!("No sitemaps listed in {}", config.index_url);
        return Ok(summary);
    }

    for sitemap in &sitemaps {
        info!("{}", sitemap);
    }
    info!("Found {} URLs in the sitemap.", sitemaps.len());

    let mut next_batch = 1;
    for sitemap in &sitemaps {
        let urls = fetch_sitemap(client, sitemap).await;

        for batch in chunk_batches(urls, config.batch_size, next_batch) {
            let progress = batch_progress(batch.urls.len(), config);
            let outcomes = crawl_batch(client, &batch.urls, &config.crawl, &progress).await;
            progress.finish_and_clear();

            let path = write_batch(&config.output_dir, batch.index, &batch.urls, &outcomes)?;
            summary.record_batch(&outcomes);

            let failed = outcomes.iter().filter(|o| o.is_failed()).count();
            if failed > 0 {
                warn!("{} of {} pages in batch {} could not be fetched", failed, outcomes.len(), batch.index);
            }
            next_batch = batch.index + 1;

            info!("Saved {} questions to {}", outcomes.len(), path.display());
        }
    }

    Ok(summary)
}

fn batch_progress(len: usize, config: &Config) -> ProgressBar {
    if !config.progress {
        return ProgressBar::hidden();
    }

    // Same stream as the log lines, so a warning lands between bar redraws
    let bar = ProgressBar::with_draw_target(Some(len as u64), ProgressDrawTarget::stdout());
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.set_message(format!("Crawling links using {} workers", config.crawl.workers));
    bar
}
