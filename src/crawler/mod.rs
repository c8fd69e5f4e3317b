//! Crawler module for trundle
//!
//! Contains the fetch-extract-enqueue engine and its two collaborator
//! traits: [`Transport`] for HTTP and [`LinkExtractor`] for pulling anchors
//! out of a response body.

mod engine;
mod extract;
mod transport;

pub use engine::Crawl;
pub use extract::{ExtractedLink, HtmlExtractor, LinkExtractor};
pub use transport::{
    build_http_client, HttpTransport, Transport, TransportError, TransportResponse,
};
