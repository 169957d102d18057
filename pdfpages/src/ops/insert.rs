//! Blank page insertion.

use lopdf::Document;
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{DocumentBuilder, PageGeometry};

/// Insert `count` blank pages so that they start at zero-based `position`.
///
/// `position` 0 puts them before the first page and `page_count` after the
/// last. Blank pages take the size of the first source page.
///
/// # Errors
///
/// - [`PdfPagesError::InvalidInsertionParameters`] when `count` is zero or
///   `position` is past the end; checked before anything is copied
/// - [`PdfPagesError::InvalidDocument`] when the source has no pages to
///   size the blanks from
pub fn insert_blank_pages(source: &Document, position: usize, count: usize) -> Result<Document> {
    let page_count = source.page_count();

    if count == 0 {
        return Err(PdfPagesError::invalid_insertion(
            "number of pages must be at least 1",
        ));
    }
    if position > page_count {
        return Err(PdfPagesError::invalid_insertion(format!(
            "position {position} is outside 0..={page_count}"
        )));
    }
    if page_count == 0 {
        return Err(PdfPagesError::invalid_document(
            "document has no pages to size blank pages from",
        ));
    }

    let size = source.page_size(0)?;
    debug!(position, count, ?size, "inserting blank pages");

    let mut builder = DocumentBuilder::for_source(source);
    for index in 0..position {
        builder.copy_page(source, index)?;
    }
    for _ in 0..count {
        builder.add_blank_page(size);
    }
    for index in position..page_count {
        builder.copy_page(source, index)?;
    }
    builder.finish()
}

/// Parse insertion parameters as typed by a person.
///
/// Both values must be non-negative integers and `count` at least 1. Bounds
/// against a document are checked by [`insert_blank_pages`].
pub fn parse_insertion_parameters(position: &str, count: &str) -> Result<(usize, usize)> {
    let position: usize = position.trim().parse().map_err(|_| {
        PdfPagesError::invalid_insertion(format!("position '{position}' is not a number"))
    })?;
    let count: usize = count.trim().parse().map_err(|_| {
        PdfPagesError::invalid_insertion(format!("number of pages '{count}' is not a number"))
    })?;

    if count == 0 {
        return Err(PdfPagesError::invalid_insertion(
            "number of pages must be at least 1",
        ));
    }

    Ok((position, count))
}
