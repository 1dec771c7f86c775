// src/sitemap/mod.rs
// =============================================================================
// This module resolves sitemap documents into lists of URLs.
//
// Submodules:
// - parse: namespace-aware <loc> extraction from sitemap XML
// - fetch: HTTP GET + parse, in a strict and a lenient flavour
//
// The same operation serves both levels of the hierarchy: a sitemap index
// yields child sitemap URLs, a leaf sitemap yields page URLs.
// =============================================================================

mod fetch;
mod parse;

pub use fetch::{fetch_sitemap, fetch_sitemap_strict};
