//! Output module for trundle
//!
//! Summarizes the registry at the end of a run: console statistics and an
//! optional markdown export.

mod report;

pub use report::{format_markdown, print_report, write_markdown, CrawlReport};
