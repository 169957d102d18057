//! Page deletion.

use std::collections::BTreeSet;

use lopdf::Document;
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{PageGeometry, parse_page_range, rebuild};

/// Remove the pages selected by `range` (1-based, e.g. `"2, 4-6"`).
///
/// # Errors
///
/// - Range errors from [`parse_page_range`]
/// - [`PdfPagesError::CannotDeleteAllPages`] when nothing would be left
pub fn delete_pages(source: &Document, range: &str) -> Result<Document> {
    let page_count = source.page_count();
    let selected = parse_page_range(range, page_count)?;
    let keep = pages_to_keep(page_count, &selected)?;

    debug!(deleted = selected.len(), kept = keep.len(), "deleting pages");
    rebuild(source, &keep)
}

/// The ascending complement of `selected` within `0..page_count`.
///
/// # Errors
///
/// - [`PdfPagesError::NoPagesSelected`] when `selected` is empty
/// - [`PdfPagesError::CannotDeleteAllPages`] when it covers every page
pub fn pages_to_keep(page_count: usize, selected: &[usize]) -> Result<Vec<usize>> {
    if selected.is_empty() {
        return Err(PdfPagesError::NoPagesSelected);
    }

    let selected: BTreeSet<usize> = selected.iter().copied().collect();
    if selected.len() >= page_count {
        return Err(PdfPagesError::CannotDeleteAllPages { page_count });
    }

    Ok((0..page_count).filter(|i| !selected.contains(i)).collect())
}
