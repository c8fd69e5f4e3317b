//! The crawl engine
//!
//! [`Crawl`] owns the registry, the cursor, and the two collaborators, and
//! drives the fetch-extract-enqueue cycle for whichever record the cursor
//! currently selects. All field accessors resolve through the cursor, so
//! there is always exactly one "active" record being read or written.

use crate::config::Config;
use crate::crawler::extract::{HtmlExtractor, LinkExtractor};
use crate::crawler::transport::{HttpTransport, Transport, TransportResponse};
use crate::registry::{CrawlRecord, Cursor, LinkRecord, Registry};
use crate::url::CanonicalUrl;
use crate::CrawlError;
use std::collections::HashMap;
use std::time::Duration;

/// Crawl frontier and traversal engine
///
/// The engine is sequential: one caller positions the cursor and awaits
/// `fetch` to completion before the next operation. Transport failures are
/// absorbed into the active record's state rather than returned, so a
/// multi-page crawl survives individual page failures.
pub struct Crawl<T = HttpTransport, X = HtmlExtractor> {
    registry: Registry,
    cursor: Cursor,
    transport: T,
    extractor: X,
}

impl Crawl {
    /// Creates an empty engine with the default HTTP transport and HTML
    /// extractor
    pub fn new() -> Result<Self, CrawlError> {
        Ok(Self::with_collaborators(
            HttpTransport::with_defaults()?,
            HtmlExtractor::new(),
        ))
    }

    /// Creates an engine seeded with one URL, which becomes the active
    /// record
    pub fn with_seed(url: &str) -> Result<Self, CrawlError> {
        let mut crawl = Self::new()?;
        crawl.set_url(url)?;
        Ok(crawl)
    }

    /// Creates an engine from a loaded configuration
    ///
    /// Builds the HTTP transport from the configured user agent and timeout
    /// and registers every seed URL; the first seed becomes the active
    /// record.
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let transport = HttpTransport::new(
            &config.user_agent.header_value(),
            Duration::from_secs(config.crawler.request_timeout),
        )?;
        let mut crawl = Self::with_collaborators(transport, HtmlExtractor::new());
        for seed in &config.seeds {
            crawl.add_url(seed)?;
        }
        Ok(crawl)
    }
}

impl<T: Transport, X: LinkExtractor> Crawl<T, X> {
    /// Creates an empty engine with explicit collaborators
    ///
    /// This is the seam tests use to script transport responses without a
    /// server.
    pub fn with_collaborators(transport: T, extractor: X) -> Self {
        Self {
            registry: Registry::new(),
            cursor: Cursor::new(),
            transport,
            extractor,
        }
    }

    /// Registers a URL without moving the cursor
    ///
    /// Re-adding a URL whose canonical key is already present is a no-op.
    pub fn add_url(&mut self, url: &str) -> Result<(), CrawlError> {
        self.registry.add(url)?;
        Ok(())
    }

    /// Registers a URL (if new) and makes it the active record
    pub fn set_url(&mut self, url: &str) -> Result<(), CrawlError> {
        let key = self.registry.add(url)?;
        if self.cursor.jump_to(&self.registry, &key) {
            Ok(())
        } else {
            Err(CrawlError::CursorDesync { url: key })
        }
    }

    /// Fetches the active record's URL
    ///
    /// No-op when the registry is empty or the active record has already
    /// been visited. On transport success the record is populated, marked
    /// visited, its links are recorded (internal ones enqueued), and a
    /// non-empty `Location` header is registered as a new unvisited record.
    /// On transport failure the failure's code and message are captured in
    /// the record, which stays unvisited and retryable.
    pub async fn fetch(&mut self) -> Result<(), CrawlError> {
        let (key, already_visited) = match self.cursor.current(&self.registry) {
            Some(record) => (record.url.clone(), record.visited),
            None => {
                tracing::debug!("fetch called on an empty registry");
                return Ok(());
            }
        };

        if already_visited {
            tracing::debug!("{} already visited, skipping fetch", key);
            return Ok(());
        }

        tracing::info!("Fetching {}", key);

        match self.transport.get(&key).await {
            Ok(TransportResponse {
                status_code,
                reason_phrase,
                content_type,
                location,
                body,
            }) => {
                tracing::debug!("{} returned {} {}", key, status_code, reason_phrase);

                if let Some(record) = self.cursor.current_mut(&mut self.registry) {
                    record.status_code = Some(status_code);
                    // The reason phrase lands in `error` even on success;
                    // `visited` is what distinguishes the outcomes.
                    record.error = Some(reason_phrase);
                    record.content_type = Some(content_type);
                    record.body = Some(body.clone());
                    record.visited = true;
                }

                self.record_links(&key, &body);

                if let Some(location) = location.filter(|l| !l.is_empty()) {
                    if let Some(record) = self.cursor.current_mut(&mut self.registry) {
                        record.location = Some(location.clone());
                    }
                    // The redirect target joins the frontier; it is not
                    // followed automatically.
                    if let Err(e) = self.registry.add(&location) {
                        tracing::debug!("Ignoring unusable Location {}: {}", location, e);
                    }
                }
            }

            Err(failure) => {
                tracing::warn!("Fetch failed for {}: {}", key, failure);
                if let Some(record) = self.cursor.current_mut(&mut self.registry) {
                    record.status_code = Some(failure.code);
                    record.error = Some(failure.message);
                }
            }
        }

        Ok(())
    }

    /// Repositions to `url` (registering it if new) and fetches it
    pub async fn fetch_url(&mut self, url: &str) -> Result<(), CrawlError> {
        self.set_url(url)?;
        self.fetch().await
    }

    /// Runs link extraction over a fetched body and records the results
    ///
    /// Every extracted target is normalized; targets that fail validation
    /// (mailto:, javascript:, malformed hrefs) are skipped. New targets are
    /// appended to the source record's link map, and internal ones are
    /// enqueued into the registry as future traversal stops.
    fn record_links(&mut self, source_key: &str, body: &str) {
        for link in self.extractor.links(body, source_key) {
            let canonical = match CanonicalUrl::parse(&link.url) {
                Ok(canonical) => canonical,
                Err(e) => {
                    tracing::debug!("Skipping link {}: {}", link.url, e);
                    continue;
                }
            };
            let target_key = canonical.key();

            let Some(source) = self.registry.get_mut(source_key) else {
                return;
            };
            let is_internal = canonical.host == source.host;

            source
                .links
                .entry(target_key.clone())
                .or_insert_with(|| LinkRecord {
                    anchor_text: link.anchor_text,
                    url: target_key.clone(),
                    is_internal,
                });

            if is_internal {
                // Duplicate enqueue is a no-op per the registry contract
                if let Err(e) = self.registry.add(&target_key) {
                    tracing::debug!("Could not enqueue {}: {}", target_key, e);
                }
            }
        }
    }

    /// Makes the next record (in insertion order, wrapping) active and
    /// returns it
    pub fn next_url(&mut self) -> Option<&CrawlRecord> {
        self.cursor.advance(&self.registry);
        self.cursor.current(&self.registry)
    }

    /// Makes the previous record (in insertion order, wrapping) active and
    /// returns it
    pub fn previous_url(&mut self) -> Option<&CrawlRecord> {
        self.cursor.retreat(&self.registry);
        self.cursor.current(&self.registry)
    }

    /// Iterates all records in insertion order
    pub fn urls(&self) -> impl Iterator<Item = &CrawlRecord> {
        self.registry.records()
    }

    /// Returns the active record, if any
    pub fn active_url(&self) -> Option<&CrawlRecord> {
        self.cursor.current(&self.registry)
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    // Field accessors for the active record. All of them read through the
    // cursor; on an empty registry they return None (or false).

    pub fn host(&self) -> Option<&str> {
        self.active_url().map(|r| r.host.as_str())
    }

    pub fn path(&self) -> Option<&str> {
        self.active_url().map(|r| r.path.as_str())
    }

    pub fn url(&self) -> Option<&str> {
        self.active_url().map(|r| r.url.as_str())
    }

    pub fn status_code(&self) -> Option<u16> {
        self.active_url().and_then(|r| r.status_code)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.active_url().and_then(|r| r.content_type.as_deref())
    }

    pub fn body(&self) -> Option<&str> {
        self.active_url().and_then(|r| r.body.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        self.active_url().and_then(|r| r.location.as_deref())
    }

    pub fn links(&self) -> Option<&HashMap<String, LinkRecord>> {
        self.active_url().map(|r| &r.links)
    }

    pub fn visited(&self) -> bool {
        self.active_url().map_or(false, |r| r.visited)
    }

    pub fn error(&self) -> Option<&str> {
        self.active_url().and_then(|r| r.error.as_deref())
    }
}
