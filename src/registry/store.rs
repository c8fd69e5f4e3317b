use crate::registry::record::CrawlRecord;
use crate::url::CanonicalUrl;
use crate::UrlError;
use std::collections::HashMap;

/// Insertion-ordered mapping from canonical URL to crawl record
///
/// The ordered key vector and the key-to-record map move together: a key is
/// pushed onto `order` exactly when its record is inserted into `records`,
/// and records are never removed during a run. Traversal order is therefore
/// discovery order.
#[derive(Debug, Default)]
pub struct Registry {
    order: Vec<String>,
    records: HashMap<String, CrawlRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds a URL, returning its canonical key
    ///
    /// Adding a URL whose canonical key is already present is a no-op; the
    /// existing record keeps all of its state.
    ///
    /// # Arguments
    ///
    /// * `url` - Any absolute http(s) URL
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The canonical key the URL maps to
    /// * `Err(UrlError)` - The URL failed validation; the registry is untouched
    pub fn add(&mut self, url: &str) -> Result<String, UrlError> {
        let canonical = CanonicalUrl::parse(url)?;
        let key = canonical.key();

        if !self.records.contains_key(&key) {
            tracing::debug!("Registering {}", key);
            self.order.push(key.clone());
            self.records
                .insert(key.clone(), CrawlRecord::new(canonical.host, canonical.path));
        }

        Ok(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&CrawlRecord> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CrawlRecord> {
        self.records.get_mut(key)
    }

    /// Returns the key at a position in insertion order
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.order.get(index).map(String::as_str)
    }

    /// Returns the insertion-order position of a key
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &CrawlRecord> {
        self.order.iter().filter_map(|key| self.records.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UrlError;

    #[test]
    fn test_add_returns_canonical_key() {
        let mut registry = Registry::new();
        let key = registry.add("http://example.com").unwrap();
        assert_eq!(key, "http://example.com/");
        assert!(registry.contains(&key));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut registry = Registry::new();
        registry.add("http://example.com/page").unwrap();

        // Mutate the record, then re-add the same URL
        registry
            .get_mut("http://example.com/page")
            .unwrap()
            .visited = true;
        registry.add("http://example.com/page").unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("http://example.com/page").unwrap().visited);
    }

    #[test]
    fn test_equivalent_urls_share_one_record() {
        let mut registry = Registry::new();
        registry.add("http://example.com/").unwrap();
        registry.add("http://example.com:80/").unwrap();
        registry.add("http://example.com/#").unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_url_leaves_registry_untouched() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.add("ftp://example.com/"),
            Err(UrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(registry.add("nonsense"), Err(UrlError::Invalid(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = Registry::new();
        registry.add("http://example.com/c").unwrap();
        registry.add("http://example.com/a").unwrap();
        registry.add("http://example.com/b").unwrap();

        let urls: Vec<_> = registry.records().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://example.com/c",
                "http://example.com/a",
                "http://example.com/b"
            ]
        );
    }

    #[test]
    fn test_key_at_and_index_of_agree() {
        let mut registry = Registry::new();
        let key = registry.add("http://example.com/one").unwrap();
        registry.add("http://example.com/two").unwrap();

        assert_eq!(registry.key_at(0), Some(key.as_str()));
        assert_eq!(registry.index_of(&key), Some(0));
        assert_eq!(registry.index_of("http://example.com/missing"), None);
        assert_eq!(registry.key_at(5), None);
    }
}
