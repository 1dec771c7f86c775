// src/error.rs
// =============================================================================
// Typed errors for the two kinds of network work we do.
//
// - SitemapError: fetching or parsing a sitemap document
// - FetchError: fetching a single page to scrape
//
// The command handlers in main.rs use anyhow::Result and wrap these with
// context; the crawl loop matches on them to decide what to log.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

/// Why a sitemap produced no links.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Connection, DNS or body-read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// The XML reader rejected the document
    #[error("invalid XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// Well-formedness problems the reader lets through (no root, unclosed tags)
    #[error("malformed sitemap: {0}")]
    Malformed(String),
}

/// Why a page produced no question.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    /// The worker task panicked or was cancelled
    #[error("worker task failed: {0}")]
    Join(String),
}

impl FetchError {
    /// Status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status(code) => Some(*code),
            FetchError::Request(e) => e.status(),
            FetchError::Join(_) => None,
        }
    }

    /// Short name for the kind of failure, used to group failures in the
    /// run summary: the status code when there is one, otherwise the
    /// transport problem.
    pub fn label(&self) -> String {
        if let Some(code) = self.status() {
            return code.as_u16().to_string();
        }
        match self {
            FetchError::Request(e) if e.is_timeout() => "timeout".to_string(),
            FetchError::Request(e) if e.is_connect() => "connect".to_string(),
            FetchError::Request(_) | FetchError::Status(_) => "request".to_string(),
            FetchError::Join(_) => "worker".to_string(),
        }
    }
}
