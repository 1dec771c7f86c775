// src/crawl/pool.rs
// =============================================================================
// Runs one batch of page URLs through a bounded pool of workers.
//
// How it works:
// 1. Each URL, tagged with its position, becomes a tokio task (spawned
//    lazily, so at most `workers` exist at once) running fetch_field
// 2. futures' `buffer_unordered(workers)` starts the next URL as soon as any
//    worker finishes, so one slow page never idles the other workers
// 3. Each result is dropped into the slot of its position; the slots are
//    read back in INPUT order once the batch is done
// 4. The progress bar ticks as each page finishes
//
// The caller awaits the whole batch before moving on; there is no pipelining
// between batches.
// =============================================================================

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use reqwest::Client;
use tracing::warn;

use super::page::{fetch_field, FieldOutcome, Jitter};
use crate::error::FetchError;
use crate::extract::ExtractionChain;

/// Settings shared by every worker for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Number of pages fetched at the same time
    pub workers: usize,
    pub jitter: Jitter,
    pub chain: Arc<ExtractionChain>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            workers: default_worker_count(),
            jitter: Jitter::default(),
            chain: Arc::new(ExtractionChain::default()),
        }
    }
}

/// One worker per available core, leaving one core free, but never zero.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .saturating_sub(1)
        .max(1)
}

/// Fetches every URL in `urls` and returns one outcome per URL, in the same
/// order. A worker that panics only loses its own URL.
pub async fn crawl_batch(
    client: &Client,
    urls: &[String],
    options: &CrawlOptions,
    progress: &ProgressBar,
) -> Vec<FieldOutcome> {
    let workers = options.workers.max(1);
    let mut slots: Vec<Option<FieldOutcome>> = urls.iter().map(|_| None).collect();

    let tasks = urls.iter().enumerate().map(|(position, url)| {
        let client = client.clone();
        let chain = Arc::clone(&options.chain);
        let jitter = options.jitter;
        let progress = progress.clone();
        let url = url.clone();

        let handle = tokio::spawn(async move {
            let outcome = fetch_field(&client, &url, jitter, &chain).await;
            progress.inc(1);
            outcome
        });
        async move { (position, handle.await) }
    });

    let mut finished = stream::iter(tasks).buffer_unordered(workers);
    while let Some((position, joined)) = finished.next().await {
        let outcome = joined.unwrap_or_else(|e| {
            warn!("Worker for {} did not finish: {}", urls[position], e);
            progress.inc(1);
            FieldOutcome::Failed(FetchError::Join(e.to_string()))
        });
        slots[position] = Some(outcome);
    }

    // buffer_unordered yields every task exactly once, so each slot is filled
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| FieldOutcome::Failed(FetchError::Join("no result recorded".into()))))
        .collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why buffer_unordered plus slots, not buffered?
//    - buffered(N) yields in input order, but a finished future keeps its
//      place in the window until every earlier one has been yielded
//    - A slow first page would then stop new pages from starting
//    - buffer_unordered(N) refills a slot the moment any page finishes; the
//      position tag puts results back in order afterwards
//
// 2. Why tokio::spawn inside the stream?
//    - A plain future inside buffered() runs on the coordinator's task
//    - Spawning puts each page on the multi-threaded runtime, so HTML parsing
//      for one page doesn't hold up the others
//
// 3. Why clone the client?
//    - reqwest::Client is an Arc internally; clones share one connection pool
// -----------------------------------------------------------------------------
