//! Output formatting and display for pdfpages.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Document reports for `info`
//! - Scrub and batch summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::output::OutputFormatter;
//! use pdfpages::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Reversing 3 file(s)");
//! formatter.success("Done");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::Config;
use crate::inspect::DocumentInfo;
use crate::io::LoadStatistics;
use crate::metadata::ScrubReport;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display load statistics to the user.
pub fn display_load_statistics(formatter: &OutputFormatter, stats: &LoadStatistics) {
    if stats.failure_count > 0 {
        formatter.warning(&format!(
            "{} file(s) failed to load",
            stats.failure_count
        ));
    }

    formatter.info(&format!(
        "Loaded {} file(s) in {:.2}s: {} pages, {}",
        stats.success_count,
        stats.total_time.as_secs_f64(),
        stats.total_pages,
        stats.format_total_size()
    ));
}

/// Display a document report.
pub fn display_document_info(formatter: &OutputFormatter, info: &DocumentInfo) {
    let title = info
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "Document".to_string());
    formatter.section(&title);

    formatter.field("Version", &info.version);
    formatter.field("Pages", &info.page_count.to_string());
    if let Some(first) = info.pages.first() {
        let size = format!("{} x {} pt", first.width, first.height);
        if info.uniform_page_size() {
            formatter.field("Page size", &size);
        } else {
            formatter.field("Page size", &format!("{size} (varies)"));
        }
    }
    formatter.field("Objects", &info.object_count.to_string());

    let metadata = &info.metadata;
    for (label, value) in [
        ("Title", &metadata.title),
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Keywords", &metadata.keywords),
        ("Creator", &metadata.creator),
        ("Producer", &metadata.producer),
        ("Created", &metadata.creation_date),
        ("Modified", &metadata.mod_date),
    ] {
        if let Some(value) = value {
            formatter.field(label, value);
        }
    }

    let yes_no = |present: bool| if present { "yes" } else { "no" };
    formatter.field("XMP metadata", yes_no(metadata.has_xmp));
    formatter.field("Document ID", yes_no(metadata.has_document_id));

    for page in &info.pages {
        formatter.detail(
            &format!("Page {}", page.number),
            &format!("{} x {} pt", page.width, page.height),
        );
    }
}

/// Display what a scrub removed.
pub fn display_scrub_report(formatter: &OutputFormatter, name: &str, report: &ScrubReport) {
    if report.removed.is_empty() && report.failed.is_empty() {
        formatter.info(&format!("{name}: no metadata found"));
    } else if !report.removed.is_empty() {
        let removed: Vec<String> = report.removed.iter().map(|c| c.to_string()).collect();
        formatter.info(&format!("{name}: removed {}", removed.join(", ")));
    }

    for failure in &report.failed {
        formatter.warning(&format!(
            "{name}: could not remove {}: {}",
            failure.category, failure.reason
        ));
    }
}

/// Display the final tally of a multi-file run.
pub fn display_batch_summary(formatter: &OutputFormatter, succeeded: usize, failed: usize) {
    if failed == 0 {
        formatter.success(&format!("Processed {succeeded} file(s)"));
    } else {
        formatter.warning(&format!(
            "Processed {succeeded} file(s), {failed} failed"
        ));
    }
}
