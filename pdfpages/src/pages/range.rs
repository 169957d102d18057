//! Page range parsing.
//!
//! Turns what a person types into a page-range box, e.g. `"2, 4-6, 9"`, into
//! zero-based page indices. Parsing is lenient per token: a token that is
//! malformed, out of bounds or inverted is skipped and the rest still count.
//! Only an empty input, or one that selects nothing at all, is an error.
//!
//! # Examples
//!
//! ```
//! use pdfpages::pages::parse_page_range;
//!
//! let pages = parse_page_range("2, 4-6, 9", 10).unwrap();
//! assert_eq!(pages, vec![1, 3, 4, 5, 8]);
//!
//! // 99 is past the end and is dropped.
//! let pages = parse_page_range("2, 99, 4", 10).unwrap();
//! assert_eq!(pages, vec![1, 3]);
//! ```

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use tracing::debug;

use crate::error::{PdfPagesError, Result};

/// Parse a 1-based page range specification into sorted, unique zero-based indices.
///
/// # Arguments
///
/// * `input` - Comma-separated pages and inclusive ranges, e.g. `"1-3, 7"`
/// * `total_pages` - Page count of the document the range refers to
///
/// # Errors
///
/// - [`PdfPagesError::EmptyInput`] when `input` is blank
/// - [`PdfPagesError::NoValidPages`] when no token selects a page
pub fn parse_page_range(input: &str, total_pages: usize) -> Result<Vec<usize>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PdfPagesError::EmptyInput);
    }

    let mut indices = BTreeSet::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match parse_token(token, total_pages) {
            Some(range) => indices.extend(range),
            None => debug!(token, total_pages, "skipping unusable page range token"),
        }
    }

    if indices.is_empty() {
        return Err(PdfPagesError::NoValidPages {
            range: input.to_string(),
            total_pages,
        });
    }

    Ok(indices.into_iter().collect())
}

/// Parse one token (`"5"` or `"2-4"`) into zero-based indices, if usable.
fn parse_token(token: &str, total_pages: usize) -> Option<RangeInclusive<usize>> {
    let (start, end) = match token.split_once('-') {
        Some((start, end)) => (parse_page_number(start)?, parse_page_number(end)?),
        None => {
            let page = parse_page_number(token)?;
            (page, page)
        }
    };

    if start < 1 || end > total_pages as i64 || start > end {
        return None;
    }

    Some((start - 1) as usize..=(end - 1) as usize)
}

fn parse_page_number(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Format zero-based indices as a compact 1-based range string.
///
/// Consecutive runs collapse into `start-end`; the inverse of
/// [`parse_page_range`] for sorted input.
///
/// ```
/// use pdfpages::pages::format_page_range;
///
/// assert_eq!(format_page_range(&[0, 1, 2, 4, 7, 8]), "1-3, 5, 8-9");
/// ```
pub fn format_page_range(indices: &[usize]) -> String {
    let mut parts = Vec::new();
    let mut iter = indices.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }

        if start == end {
            parts.push(format!("{}", start + 1));
        } else {
            parts.push(format!("{}-{}", start + 1, end + 1));
        }
    }

    parts.join(", ")
}
