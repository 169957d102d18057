//! Concatenating documents.

use lopdf::Document;
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{DocumentBuilder, PageGeometry};

/// Concatenate every page of every source, in source order.
///
/// The header version of the first source is used for the result.
///
/// # Errors
///
/// - [`PdfPagesError::NoFilesToMerge`] when `sources` is empty
/// - [`PdfPagesError::EmptyPageOrder`] when no source has any page
pub fn merge_documents(sources: &[Document]) -> Result<Document> {
    let Some(first) = sources.first() else {
        return Err(PdfPagesError::NoFilesToMerge);
    };

    let mut builder = DocumentBuilder::for_source(first);
    for (position, source) in sources.iter().enumerate() {
        let page_count = source.page_count();
        debug!(position, page_count, "appending document");

        if position == 0 {
            append_all(&mut builder, source, page_count)?;
        } else {
            // Renumber so shared objects cannot collide with earlier sources.
            let mut source = source.clone();
            source.renumber_objects_with(builder.max_id() + 1);
            append_all(&mut builder, &source, page_count)?;
        }
    }
    builder.finish()
}

fn append_all(builder: &mut DocumentBuilder, source: &Document, page_count: usize) -> Result<()> {
    for index in 0..page_count {
        builder.copy_page(source, index)?;
    }
    Ok(())
}
