// src/sitemap/parse.rs
// =============================================================================
// Pulls the <loc> URLs out of a sitemap document.
//
// Sitemaps (both <sitemapindex> and <urlset>) put every address inside a
// <loc> element in the sitemaps.org namespace. We stream the document with
// quick-xml's namespace-aware reader and collect the text of each matching
// <loc>, at any depth, in document order.
//
// quick-xml is a streaming reader and is lenient about a few things a tree
// parser would reject (missing root, unclosed elements at EOF, text after the
// root), so we track nesting depth ourselves and reject those documents.
// =============================================================================

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::SitemapError;

/// Namespace every sitemap <loc> must be bound to
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Returns the text of every sitemaps.org `<loc>` element in `xml`.
///
/// `<loc>` elements outside the sitemap namespace are ignored. Entities are
/// unescaped, surrounding whitespace is trimmed and empty `<loc>`s are
/// skipped.
pub fn parse_sitemap_locs(xml: &str) -> Result<Vec<String>, SitemapError> {
    let mut reader = NsReader::from_str(xml);
    let mut locs = Vec::new();

    let mut depth = 0usize;
    let mut seen_root = false;
    // (depth of the open <loc>, text collected so far)
    let mut current: Option<(usize, String)> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| SitemapError::Xml { position, message: e.to_string() })?;
        let in_sitemap_ns = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == SITEMAP_NS.as_bytes());

        match event {
            Event::Start(e) => {
                if depth == 0 {
                    open_root(&mut seen_root)?;
                }
                depth += 1;
                if current.is_none() && in_sitemap_ns && e.local_name().as_ref() == b"loc" {
                    current = Some((depth, String::new()));
                }
            }
            Event::Empty(_) => {
                if depth == 0 {
                    open_root(&mut seen_root)?;
                }
            }
            Event::End(_) => {
                if matches!(current, Some((loc_depth, _)) if loc_depth == depth) {
                    if let Some((_, text)) = current.take() {
                        let url = text.trim();
                        if !url.is_empty() {
                            locs.push(url.to_string());
                        }
                    }
                }
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SitemapError::Malformed("closing tag without an open element".into()))?;
            }
            Event::Text(e) => {
                if let Some((_, text)) = current.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| SitemapError::Xml { position, message: err.to_string() })?;
                    text.push_str(&unescaped);
                } else if depth == 0 && !e.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(SitemapError::Malformed("text outside the root element".into()));
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if !seen_root {
        return Err(SitemapError::Malformed("document has no root element".into()));
    }
    if depth != 0 {
        return Err(SitemapError::Malformed(format!("{depth} element(s) left unclosed")));
    }

    Ok(locs)
}

// A well-formed document has exactly one top-level element
fn open_root(seen_root: &mut bool) -> Result<(), SitemapError> {
    if *seen_root {
        return Err(SitemapError::Malformed("content after the root element".into()));
    }
    *seen_root = true;
    Ok(())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why NsReader and not a plain Reader?
//    - Sitemaps may use a prefix (<sm:loc>) or a default namespace (<loc>)
//    - NsReader resolves either form to the namespace URI, so we compare
//      URIs instead of raw tag names
//
// 2. Why track `current` with a depth?
//    - A <loc> normally holds only text, but comments or stray children
//      could sit inside it; we only close the <loc> on its own end tag
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-1.xml</loc><lastmod>2024-01-01</lastmod></sitemap>
  <sitemap><loc>https://example.com/sitemap-2.xml</loc></sitemap>
  <sitemap><loc>https://example.com/sitemap-3.xml</loc></sitemap>
</sitemapindex>"#;

    #[test]
    fn test_index_locs_in_document_order() {
        let locs = parse_sitemap_locs(INDEX).unwrap();
        assert_eq!(
            locs,
            vec![
                "https://example.com/sitemap-1.xml",
                "https://example.com/sitemap-2.xml",
                "https://example.com/sitemap-3.xml",
            ]
        );
    }

    #[test]
    fn test_urlset_with_prefixed_namespace() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sm:url><sm:loc>https://example.com/q/1</sm:loc></sm:url>
            <sm:url><sm:loc>https://example.com/q/2</sm:loc></sm:url>
        </sm:urlset>"#;
        let locs = parse_sitemap_locs(xml).unwrap();
        assert_eq!(locs, vec!["https://example.com/q/1", "https://example.com/q/2"]);
    }

    #[test]
    fn test_loc_outside_namespace_ignored() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
                             xmlns:img="http://www.google.com/schemas/sitemap-image/1.1">
            <url>
              <loc>https://example.com/page</loc>
              <img:image><img:loc>https://example.com/pic.png</img:loc></img:image>
            </url>
        </urlset>"#;
        let locs = parse_sitemap_locs(xml).unwrap();
        assert_eq!(locs, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_no_namespace_yields_nothing() {
        let xml = "<urlset><url><loc>https://example.com/a</loc></url></urlset>";
        assert!(parse_sitemap_locs(xml).unwrap().is_empty());
    }

    #[test]
    fn test_entities_unescaped_and_whitespace_trimmed() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>
                https://example.com/search?a=1&amp;b=2
            </loc></url>
            <url><loc>   </loc></url>
        </urlset>"#;
        let locs = parse_sitemap_locs(xml).unwrap();
        assert_eq!(locs, vec!["https://example.com/search?a=1&b=2"]);
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://example.com/a</loc></urlset>"#;
        assert!(parse_sitemap_locs(xml).is_err());
    }

    #[test]
    fn test_unclosed_root_rejected() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://example.com/a</loc></url>"#;
        assert!(matches!(parse_sitemap_locs(xml), Err(SitemapError::Malformed(_))));
    }

    #[test]
    fn test_not_xml_rejected() {
        assert!(parse_sitemap_locs("<!doctype html> oops").is_err());
        assert!(parse_sitemap_locs("plain text").is_err());
        assert!(parse_sitemap_locs("").is_err());
    }

    #[test]
    fn test_count_matches_number_of_locs() {
        let mut xml = String::from(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        for i in 0..120 {
            xml.push_str(&format!("<url><loc>https://example.com/q/{i}</loc></url>"));
        }
        xml.push_str("</urlset>");

        let locs = parse_sitemap_locs(&xml).unwrap();
        assert_eq!(locs.len(), 120);
        assert_eq!(locs[0], "https://example.com/q/0");
        assert_eq!(locs[119], "https://example.com/q/119");
    }
}
