//! Page extraction into single-page documents.

use lopdf::Document;
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{PageGeometry, parse_page_range, rebuild};

/// One extracted page.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// 1-based number of the page in the source document.
    pub page_number: usize,
    /// Single-page document holding the page.
    pub document: Document,
}

impl ExtractedPage {
    /// Conventional file name for this page, `page-{n}.pdf`.
    pub fn file_name(&self) -> String {
        format!("page-{}.pdf", self.page_number)
    }
}

/// Extract each page selected by `range` into its own document, ascending.
pub fn extract_pages(source: &Document, range: &str) -> Result<Vec<ExtractedPage>> {
    let selected = parse_page_range(range, source.page_count())?;
    extract_indices(source, &selected)
}

/// Extract the given zero-based pages, in the order given.
///
/// # Errors
///
/// - [`PdfPagesError::NoPagesSelected`] when `indices` is empty
/// - [`PdfPagesError::InvalidPageIndex`] for an out-of-bounds index
pub fn extract_indices(source: &Document, indices: &[usize]) -> Result<Vec<ExtractedPage>> {
    if indices.is_empty() {
        return Err(PdfPagesError::NoPagesSelected);
    }

    debug!(pages = indices.len(), "extracting pages");
    indices
        .iter()
        .map(|&index| {
            Ok(ExtractedPage {
                page_number: index + 1,
                document: rebuild(source, &[index])?,
            })
        })
        .collect()
}
