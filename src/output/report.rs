//! Crawl summary generation
//!
//! Builds a [`CrawlReport`] from the registry's records. The engine stores
//! the reason phrase in `error` even on success, so classification never
//! looks at that field alone; the split is driven by `visited` and the
//! recorded status code.

use crate::registry::CrawlRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Aggregated view of one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Total records in the registry
    pub total_urls: u64,

    /// Records fetched without a transport failure
    pub visited: u64,

    /// Records never attempted (the remaining frontier)
    pub pending: u64,

    /// Records whose last fetch attempt failed at the transport level
    pub failed: u64,

    /// Link entries pointing at the source record's own host
    pub internal_links: u64,

    /// Link entries pointing elsewhere
    pub external_links: u64,

    /// Visited records that carried a Location header
    pub redirects: u64,

    /// Count of records per recorded status code
    pub status_counts: HashMap<u16, u64>,
}

impl CrawlReport {
    /// Builds a report from records in any order
    pub fn from_records<'a>(records: impl Iterator<Item = &'a CrawlRecord>) -> Self {
        let mut report = CrawlReport::default();

        for record in records {
            report.total_urls += 1;

            if record.visited {
                report.visited += 1;
                if record.location.is_some() {
                    report.redirects += 1;
                }
            } else if record.error.is_some() {
                report.failed += 1;
            } else {
                report.pending += 1;
            }

            if let Some(code) = record.status_code {
                *report.status_counts.entry(code).or_default() += 1;
            }

            for link in record.links.values() {
                if link.is_internal {
                    report.internal_links += 1;
                } else {
                    report.external_links += 1;
                }
            }
        }

        report
    }
}

/// Prints a report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");

    println!("Registry:");
    println!("  Total URLs discovered: {}", report.total_urls);
    println!("  Visited: {}", report.visited);
    println!("  Failed fetches: {}", report.failed);
    println!("  Still pending: {}", report.pending);
    println!();

    println!("Links:");
    println!("  Internal: {}", report.internal_links);
    println!("  External: {}", report.external_links);
    println!("  Redirects seen: {}", report.redirects);
    println!();

    if !report.status_counts.is_empty() {
        println!("Status codes:");
        let mut codes: Vec<_> = report.status_counts.iter().collect();
        codes.sort_by_key(|(code, _)| **code);
        for (code, count) in codes {
            println!("  {}: {}", code, count);
        }
    }
}

/// Formats a report as a markdown document
pub fn format_markdown(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Crawl Summary\n\n");

    md.push_str("## Registry\n\n");
    md.push_str(&format!("- **Total URLs**: {}\n", report.total_urls));
    md.push_str(&format!("- **Visited**: {}\n", report.visited));
    md.push_str(&format!("- **Failed fetches**: {}\n", report.failed));
    md.push_str(&format!("- **Still pending**: {}\n\n", report.pending));

    md.push_str("## Links\n\n");
    md.push_str(&format!("- **Internal**: {}\n", report.internal_links));
    md.push_str(&format!("- **External**: {}\n", report.external_links));
    md.push_str(&format!("- **Redirects seen**: {}\n\n", report.redirects));

    if !report.status_counts.is_empty() {
        md.push_str("## Status Codes\n\n");
        md.push_str("| Status | Count |\n");
        md.push_str("|--------|-------|\n");
        let mut codes: Vec<_> = report.status_counts.iter().collect();
        codes.sort_by_key(|(code, _)| **code);
        for (code, count) in codes {
            md.push_str(&format!("| {} | {} |\n", code, count));
        }
    }

    md
}

/// Writes the markdown report to a file
pub fn write_markdown(report: &CrawlReport, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_markdown(report).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LinkRecord;

    fn record(url: &str) -> CrawlRecord {
        CrawlRecord::new("http://example.com".to_string(), url.to_string())
    }

    fn sample_records() -> Vec<CrawlRecord> {
        // Visited page with one internal and one external link
        let mut home = record("/");
        home.visited = true;
        home.status_code = Some(200);
        home.error = Some("OK".to_string());
        home.links.insert(
            "http://example.com/about".to_string(),
            LinkRecord {
                anchor_text: "About".to_string(),
                url: "http://example.com/about".to_string(),
                is_internal: true,
            },
        );
        home.links.insert(
            "http://other.com/".to_string(),
            LinkRecord {
                anchor_text: "Other".to_string(),
                url: "http://other.com/".to_string(),
                is_internal: false,
            },
        );

        // Visited redirect
        let mut moved = record("/old");
        moved.visited = true;
        moved.status_code = Some(301);
        moved.error = Some("Moved Permanently".to_string());
        moved.location = Some("http://example.com/new".to_string());

        // Failed fetch, still unvisited
        let mut broken = record("/broken");
        broken.status_code = Some(503);
        broken.error = Some("HTTP 503 Service Unavailable".to_string());

        // Never attempted
        let pending = record("/about");

        vec![home, moved, broken, pending]
    }

    #[test]
    fn test_report_classifies_records() {
        let records = sample_records();
        let report = CrawlReport::from_records(records.iter());

        assert_eq!(report.total_urls, 4);
        assert_eq!(report.visited, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.pending, 1);
        assert_eq!(report.redirects, 1);
        assert_eq!(report.internal_links, 1);
        assert_eq!(report.external_links, 1);
    }

    #[test]
    fn test_success_path_error_field_is_not_a_failure() {
        // `error` holds the reason phrase on success; classification must
        // not treat it as a failed fetch
        let mut ok = record("/");
        ok.visited = true;
        ok.status_code = Some(200);
        ok.error = Some("OK".to_string());

        let report = CrawlReport::from_records(std::iter::once(&ok));
        assert_eq!(report.visited, 1);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_status_counts() {
        let records = sample_records();
        let report = CrawlReport::from_records(records.iter());

        assert_eq!(report.status_counts.get(&200), Some(&1));
        assert_eq!(report.status_counts.get(&301), Some(&1));
        assert_eq!(report.status_counts.get(&503), Some(&1));
        assert_eq!(report.status_counts.get(&404), None);
    }

    #[test]
    fn test_empty_report() {
        let report = CrawlReport::from_records(std::iter::empty());
        assert_eq!(report.total_urls, 0);
        assert!(report.status_counts.is_empty());
    }

    #[test]
    fn test_markdown_contains_sections() {
        let records = sample_records();
        let report = CrawlReport::from_records(records.iter());
        let md = format_markdown(&report);

        assert!(md.contains("# Crawl Summary"));
        assert!(md.contains("- **Total URLs**: 4"));
        assert!(md.contains("| 503 | 1 |"));
    }

    #[test]
    fn test_markdown_omits_empty_status_table() {
        let report = CrawlReport::from_records(std::iter::empty());
        let md = format_markdown(&report);
        assert!(!md.contains("## Status Codes"));
    }
}
