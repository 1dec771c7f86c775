// src/output/writer.rs
// =============================================================================
// Writes one batch to one delimited file.
//
// Format:
// - header row: link, question
// - one row per page, in batch order
// - tab delimiter, so commas in question titles need no special care
// - every field quoted; both columns are text, so "quote everything that
//   isn't a number" means quoting everything
// - a missing question is an empty quoted field
//
// The file is created fresh each time; an existing file with the same batch
// number is overwritten.
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::crawl::FieldOutcome;

/// One row of a batch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub link: String,
    pub question: Option<String>,
}

/// `<dir>/questions_<index>.csv`
pub fn batch_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("questions_{index}.csv"))
}

/// Writes `urls` paired with `outcomes` to the file for batch `index`,
/// creating `dir` if needed. Returns the path written.
pub fn write_batch(dir: &Path, index: usize, urls: &[String], outcomes: &[FieldOutcome]) -> Result<PathBuf> {
    if urls.len() != outcomes.len() {
        bail!(
            "batch {} has {} URLs but {} results",
            index,
            urls.len(),
            outcomes.len()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = batch_path(dir, index);
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    // Written by hand so an empty batch still gets a header
    writer.write_record(["link", "question"])?;
    for (url, outcome) in urls.iter().zip(outcomes) {
        writer.serialize(OutputRecord {
            link: url.clone(),
            question: outcome.question().map(str::to_string),
        })?;
    }
    writer.flush().with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
