//! Loading and saving documents.

pub mod reader;
pub mod writer;

use std::path::Path;

use lopdf::Document;

pub use reader::{LoadResult, LoadStatistics, LoadedPdf, PdfReader, check_path};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::error::Result;

/// Load and verify a single PDF.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    Ok(PdfReader::new().load(path).await?.document)
}

/// Save a PDF atomically with default compression.
pub async fn save_pdf(doc: &Document, path: &Path) -> Result<WriteStatistics> {
    PdfWriter::new().save(doc, path).await
}
