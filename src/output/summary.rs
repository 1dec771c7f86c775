// src/output/summary.rs
// Run-wide counters, reported once the last batch is written.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::crawl::FieldOutcome;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Child sitemaps listed in the index
    pub sitemaps: usize,
    /// Page URLs crawled across all sitemaps
    pub pages: usize,
    pub batches_written: usize,
    pub extracted: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Failed pages grouped by status code ("404", "500") or transport
    /// problem ("timeout", "connect")
    pub failures_by_status: BTreeMap<String, usize>,
}

impl RunSummary {
    /// Adds one batch's outcomes to the totals.
    pub fn record_batch(&mut self, outcomes: &[FieldOutcome]) {
        self.batches_written += 1;
        self.pages += outcomes.len();
        for outcome in outcomes {
            match outcome {
                FieldOutcome::Extracted(_) => self.extracted += 1,
                FieldOutcome::NotFound => self.not_found += 1,
                FieldOutcome::Failed(e) => {
                    self.failed += 1;
                    *self.failures_by_status.entry(e.label()).or_insert(0) += 1;
                }
            }
        }
    }

    /// Prints a human-readable summary
    pub fn print_table(&self) {
        println!();
        println!("📊 Summary:");
        println!("   🗺️  Sitemaps: {}", self.sitemaps);
        println!("   📄 Pages: {}", self.pages);
        println!("   💾 Batches written: {}", self.batches_written);
        println!("   ✅ Questions extracted: {}", self.extracted);
        println!("   ➖ No question on page: {}", self.not_found);
        println!("   ❌ Failed requests: {}", self.failed);
        for (label, count) in &self.failures_by_status {
            println!("      {}: {}", label, count);
        }
    }
}
