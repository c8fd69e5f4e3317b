//! Registry module for trundle
//!
//! The registry is the single source of truth for discovered URLs: an
//! insertion-ordered mapping from canonical URL to crawl record, plus a
//! cursor that selects the active record for the engine's accessors.

mod cursor;
mod record;
mod store;

pub use cursor::Cursor;
pub use record::{CrawlRecord, LinkRecord};
pub use store::Registry;
