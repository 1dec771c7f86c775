// src/sitemap/fetch.rs
// =============================================================================
// Downloads a sitemap document and hands it to the parser.
//
// Two flavours:
// - fetch_sitemap_strict: returns the error; used for the top-level index,
//   where there is nothing sensible to do without it
// - fetch_sitemap: logs the error and returns an empty list; used for every
//   child sitemap so one bad document doesn't stop the run
// =============================================================================

use reqwest::Client;
use tracing::{debug, info, warn};

use super::parse::parse_sitemap_locs;
use crate::error::SitemapError;

/// GETs `url` and returns the `<loc>` URLs it lists.
pub async fn fetch_sitemap_strict(client: &Client, url: &str) -> Result<Vec<String>, SitemapError> {
    debug!(sitemap = url, "fetching sitemap");

    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SitemapError::Status(status));
    }

    let body = response.text().await?;
    parse_sitemap_locs(&body)
}

/// Like [`fetch_sitemap_strict`], but any failure becomes "no links".
pub async fn fetch_sitemap(client: &Client, url: &str) -> Vec<String> {
    match fetch_sitemap_strict(client, url).await {
        Ok(links) => {
            info!("Found {} URLs in {}", links.len(), url);
            links
        }
        Err(e) => {
            warn!("Error fetching or parsing sitemap {}: {}", url, e);
            Vec::new()
        }
    }
}
