// src/extract.rs
// =============================================================================
// This module pulls the question title out of a page's HTML.
//
// The title lives at the end of a fixed chain of nested elements:
//
//   <div class="qa-main-heading">
//     <h1>
//       <a href="...">
//         <span itemprop="name">The question title</span>
//
// Each step takes the FIRST match among the descendants of the element found
// by the previous step. If any step finds nothing the page simply has no
// title for us; that is a miss, not an error.
//
// We use the `scraper` crate for parsing and CSS selectors.
// =============================================================================

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

/// Selector steps used when none are given on the command line
pub const DEFAULT_CHAIN: &[&str] = &[
    "div.qa-main-heading",
    "h1",
    "a",
    r#"span[itemprop="name"]"#,
];

/// An ordered list of CSS selectors, each applied inside the previous match.
#[derive(Debug, Clone)]
pub struct ExtractionChain {
    steps: Vec<Selector>,
}

impl ExtractionChain {
    /// Builds a chain from selector strings. Fails on an empty list or on a
    /// selector `scraper` can't parse.
    pub fn parse<S: AsRef<str>>(selectors: &[S]) -> Result<Self> {
        if selectors.is_empty() {
            return Err(anyhow!("extraction chain needs at least one selector"));
        }

        let steps = selectors
            .iter()
            .map(|s| {
                let s = s.as_ref();
                Selector::parse(s).map_err(|e| anyhow!("Invalid selector '{}': {:?}", s, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { steps })
    }

    /// Returns the text of the element at the end of the chain, or `None`
    /// as soon as one step has no match.
    pub fn extract(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        let (first, rest) = self.steps.split_first()?;
        let mut element: ElementRef = document.select(first).next()?;
        for step in rest {
            element = element.select(step).next()?;
        }

        Some(element.text().collect())
    }
}

impl Default for ExtractionChain {
    fn default() -> Self {
        // DEFAULT_CHAIN is constant and covered by tests
        Self::parse(DEFAULT_CHAIN).expect("default extraction chain is valid")
    }
}
