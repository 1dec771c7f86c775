// src/output/mod.rs
// =============================================================================
// This module persists crawl results.
//
// - writer: one tab-separated file per batch (questions_<n>.csv)
// - summary: run-wide counters, printed as a table or as JSON
// =============================================================================

mod summary;
mod writer;

pub use summary::RunSummary;
pub use writer::write_batch;

#[cfg(test)]
pub use writer::{batch_path, OutputRecord};
