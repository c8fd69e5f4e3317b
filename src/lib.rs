//! Trundle: a single-threaded crawl frontier and traversal engine
//!
//! This crate maintains an insertion-ordered registry of discovered URLs,
//! exposes a movable cursor over that registry, and drives a
//! fetch-extract-enqueue cycle that grows the registry as internal links are
//! discovered. HTTP transport and HTML link extraction are pluggable
//! collaborators behind narrow traits.

pub mod config;
pub mod crawler;
pub mod output;
pub mod registry;
pub mod url;

use thiserror::Error;

/// Main error type for trundle operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    /// Should be unreachable: a key inserted by `add_url` could not be
    /// located in the registry's key order afterwards.
    #[error("Cursor could not locate {url} after insertion")]
    CursorDesync { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL validation errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("The url format is invalid: {0}")]
    Invalid(String),

    #[error("Only http and https protocols are supported, got: {0}")]
    UnsupportedScheme(String),
}

/// Result type alias for trundle operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawl, HtmlExtractor, HttpTransport, LinkExtractor, Transport};
pub use registry::{CrawlRecord, LinkRecord};
pub use url::{validate_url, CanonicalUrl};
