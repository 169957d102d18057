//! pdfpages - Page-level editing of PDF documents.
//!
//! This library rebuilds PDF documents page by page. It supports:
//!
//! - Page range parsing (`"1-3, 7"`)
//! - Inserting blank pages, deleting, extracting and reversing pages
//! - Splitting pages into halves and rotating them
//! - An editable page order for organizing (move, duplicate, delete)
//! - Merging documents
//! - Removing identifying metadata
//!
//! Every operation borrows its source and returns a new document, so the
//! original is never modified.
//!
//! # Examples
//!
//! ## Delete pages
//!
//! ```no_run
//! use pdfpages::io::{PdfReader, PdfWriter};
//! use pdfpages::ops::delete_pages;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("input.pdf")).await?;
//! let trimmed = delete_pages(&loaded.document, "2, 4-6")?;
//! PdfWriter::new().save(&trimmed, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Organize pages
//!
//! ```no_run
//! use pdfpages::ops::organize_pages;
//! use pdfpages::pages::{PageGeometry, PageOrder, PageOrderMode};
//!
//! # fn example(doc: &lopdf::Document) -> pdfpages::Result<()> {
//! let mut order = PageOrder::new(doc.page_count(), PageOrderMode::Organize)?;
//! let first = order.id_at(0).cloned().unwrap();
//! let last = order.id_at(order.len() - 1).cloned().unwrap();
//! order.reorder(&last, &first);
//! order.duplicate(&last)?;
//! let organized = organize_pages(doc, &order)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod error;
pub mod inspect;
pub mod io;
pub mod metadata;
pub mod ops;
pub mod output;
pub mod pages;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfPagesError, Result};
pub use ops::Operation;
pub use pages::{PageGeometry, parse_page_range, rebuild};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
