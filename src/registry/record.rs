use std::collections::HashMap;

/// Per-page crawl state, created once per canonical URL and never destroyed
/// during a run
///
/// `host`, `path`, and `url` are fixed at creation. The remaining fields are
/// unset until a fetch attempt touches the record. `visited` flips to true
/// only when a fetch completes without a transport failure; a failed fetch
/// leaves it false so the record stays retryable.
#[derive(Debug, Clone)]
pub struct CrawlRecord {
    /// Scheme, userinfo, hostname, and explicit port
    pub host: String,

    /// Path with glued query and trailing fragment
    pub path: String,

    /// Canonical key, `host ++ path`
    pub url: String,

    /// HTTP status code, or the transport failure code
    pub status_code: Option<u16>,

    /// Content-Type header of the last fetch
    pub content_type: Option<String>,

    /// Response body of the last fetch
    pub body: Option<String>,

    /// Location header of the last fetch, when present and non-empty
    pub location: Option<String>,

    /// Reason phrase on success, failure message on transport failure.
    /// A set `error` is NOT proof of failure; check `visited` or the
    /// status code range instead.
    pub error: Option<String>,

    /// Links discovered on this page, keyed by target canonical URL
    pub links: HashMap<String, LinkRecord>,

    /// True once a fetch attempt completed without a transport failure
    pub visited: bool,
}

impl CrawlRecord {
    /// Creates a fresh, unvisited record for a canonical URL
    pub fn new(host: String, path: String) -> Self {
        let url = format!("{}{}", host, path);
        Self {
            host,
            path,
            url,
            status_code: None,
            content_type: None,
            body: None,
            location: None,
            error: None,
            links: HashMap::new(),
            visited: false,
        }
    }
}

/// A link discovered on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Visible text of the anchor element
    pub anchor_text: String,

    /// Canonical URL of the link target
    pub url: String,

    /// True when the target host equals the source record's host
    pub is_internal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unvisited_and_empty() {
        let record = CrawlRecord::new("http://example.com".to_string(), "/about".to_string());

        assert_eq!(record.url, "http://example.com/about");
        assert_eq!(record.host, "http://example.com");
        assert_eq!(record.path, "/about");
        assert!(!record.visited);
        assert!(record.status_code.is_none());
        assert!(record.content_type.is_none());
        assert!(record.body.is_none());
        assert!(record.location.is_none());
        assert!(record.error.is_none());
        assert!(record.links.is_empty());
    }
}
