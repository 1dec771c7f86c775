// src/crawl/mod.rs
// =============================================================================
// This module turns page URLs into scraped question titles.
//
// Submodules:
// - batch: splits the page list into fixed-size, globally numbered batches
// - page: one unit of work (jitter, GET, extract) and its outcome type
// - pool: runs a batch through a bounded, order-preserving worker pool
//
// Nothing is shared between workers except the HTTP client's connection pool.
// =============================================================================

mod batch;
mod page;
mod pool;

pub use batch::chunk_batches;
pub use page::{FieldOutcome, Jitter};
pub use pool::{crawl_batch, default_worker_count, CrawlOptions};
