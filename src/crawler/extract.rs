//! HTML link extraction
//!
//! Pulls anchor elements out of a response body and resolves their targets
//! against the page's URL. Extraction is deliberately permissive: anything
//! with an `href` that resolves comes back, in document order, and the
//! engine's link recorder decides what is worth keeping (non-http targets
//! fall out there during normalization).

use scraper::{Html, Selector};
use url::Url;

/// An anchor found in a page body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// Visible text of the anchor element
    pub anchor_text: String,

    /// Absolute target URL, resolved against the page URL
    pub url: String,
}

/// Link extraction contract
///
/// Implementations yield a finite sequence of `(anchor text, absolute URL)`
/// pairs with relative references resolved against `base_url`. Order may be
/// arbitrary but must be stable for a given input.
pub trait LinkExtractor {
    fn links(&self, body: &str, base_url: &str) -> Vec<ExtractedLink>;
}

/// scraper-backed [`LinkExtractor`] over `a[href]` elements
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlExtractor {
    fn links(&self, body: &str, base_url: &str) -> Vec<ExtractedLink> {
        let base = match Url::parse(base_url) {
            Ok(base) => base,
            Err(e) => {
                tracing::debug!("Unusable base URL {}: {}", base_url, e);
                return Vec::new();
            }
        };

        let document = Html::parse_document(body);
        let mut links = Vec::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in document.select(&selector) {
                let Some(href) = element.value().attr("href") else {
                    continue;
                };

                match base.join(href.trim()) {
                    Ok(absolute) => links.push(ExtractedLink {
                        anchor_text: element.text().collect::<String>().trim().to_string(),
                        url: absolute.to_string(),
                    }),
                    Err(e) => {
                        tracing::debug!("Skipping unresolvable href {}: {}", href, e);
                    }
                }
            }
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.com/page";

    fn extract(body: &str) -> Vec<ExtractedLink> {
        HtmlExtractor::new().links(body, BASE)
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<a href="http://other.com/page">Other</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://other.com/page");
        assert_eq!(links[0].anchor_text, "Other");
    }

    #[test]
    fn test_extract_relative_links() {
        let links = extract(r#"<a href="/about">About</a><a href="sibling">Next</a>"#);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "http://example.com/about");
        assert_eq!(links[1].url, "http://example.com/sibling");
    }

    #[test]
    fn test_anchor_text_collects_nested_markup() {
        let links = extract(r#"<a href="/a">Read <b>more</b></a>"#);
        assert_eq!(links[0].anchor_text, "Read more");
    }

    #[test]
    fn test_document_order_preserved() {
        let links = extract(
            r#"<a href="/first">1</a><p><a href="/second">2</a></p><a href="/third">3</a>"#,
        );
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://example.com/first",
                "http://example.com/second",
                "http://example.com/third"
            ]
        );
    }

    #[test]
    fn test_non_http_targets_still_extracted() {
        // Scheme filtering is the link recorder's job, not the extractor's
        let links = extract(r#"<a href="mailto:admin@example.com">Mail</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "mailto:admin@example.com");
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let links = extract(r#"<a name="top">Top</a><a href="/real">Real</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://example.com/real");
    }

    #[test]
    fn test_empty_and_linkless_bodies() {
        assert!(extract("").is_empty());
        assert!(extract("<p>No links here</p>").is_empty());
    }

    #[test]
    fn test_unparseable_base_yields_nothing() {
        let links = HtmlExtractor::new().links(r#"<a href="/a">A</a>"#, "not a url");
        assert!(links.is_empty());
    }
}
