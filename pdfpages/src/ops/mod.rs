//! Page operations.
//!
//! Each operation is a plain function that borrows a source document and
//! returns a new one (or, for extraction, several). [`Operation`] wraps them
//! so the same edit can be described once and applied to many files.

pub mod delete;
pub mod extract;
pub mod insert;
pub mod merge;
pub mod reorder;
pub mod rotate;
pub mod split;

use std::fmt;

use lopdf::Document;

use crate::error::Result;
use crate::metadata::{MetadataScrubber, ScrubReport};
use crate::pages::{PageGeometry, PageOrder, PageOrderMode};

pub use delete::{delete_pages, pages_to_keep};
pub use extract::{ExtractedPage, extract_indices, extract_pages};
pub use insert::{insert_blank_pages, parse_insertion_parameters};
pub use merge::merge_documents;
pub use reorder::{OrganizeStep, apply_steps, organize_pages, reverse_pages};
pub use rotate::{Rotation, rotate_pages};
pub use split::{SplitMode, split_pages_in_half};

/// A single-document page operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Insert blank pages.
    InsertBlank {
        /// Zero-based position of the first blank page.
        position: usize,
        /// Number of blank pages.
        count: usize,
    },
    /// Delete the pages in a range.
    Delete {
        /// 1-based page range.
        range: String,
    },
    /// Extract the pages in a range into single-page documents.
    Extract {
        /// 1-based page range.
        range: String,
    },
    /// Reverse page order.
    Reverse,
    /// Split every page in half.
    Split {
        /// Direction of the cut.
        mode: SplitMode,
    },
    /// Rotate pages.
    Rotate {
        /// Rotation to add.
        rotation: Rotation,
        /// 1-based page range, all pages when `None`.
        range: Option<String>,
    },
    /// Apply organizer edits, then save the resulting order.
    Organize {
        /// Edits in the order they are applied.
        steps: Vec<OrganizeStep>,
        /// Whether duplication is allowed.
        mode: PageOrderMode,
    },
    /// Remove document metadata.
    Scrub,
}

/// What an [`Operation`] produced.
#[derive(Debug)]
pub enum OperationOutput {
    /// A single rebuilt document.
    Document(Document),
    /// One document per extracted page.
    Pages(Vec<ExtractedPage>),
    /// The scrubbed document and what was removed.
    Scrubbed {
        /// Document with metadata removed.
        document: Document,
        /// Per-category outcome.
        report: ScrubReport,
    },
}

impl OperationOutput {
    /// Number of output documents.
    pub fn document_count(&self) -> usize {
        match self {
            Self::Pages(pages) => pages.len(),
            Self::Document(_) | Self::Scrubbed { .. } => 1,
        }
    }

    /// Total pages across all output documents.
    pub fn page_count(&self) -> usize {
        match self {
            Self::Document(document) | Self::Scrubbed { document, .. } => document.page_count(),
            Self::Pages(pages) => pages.iter().map(|p| p.document.page_count()).sum(),
        }
    }
}

impl Operation {
    /// Short name used in logs and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertBlank { .. } => "insert",
            Self::Delete { .. } => "delete",
            Self::Extract { .. } => "extract",
            Self::Reverse => "reverse",
            Self::Split { .. } => "split",
            Self::Rotate { .. } => "rotate",
            Self::Organize { .. } => "organize",
            Self::Scrub => "scrub",
        }
    }

    /// Whether the operation writes one file per page instead of one document.
    pub fn produces_pages(&self) -> bool {
        matches!(self, Self::Extract { .. })
    }

    /// Apply the operation to a loaded document.
    ///
    /// The document is consumed because scrubbing edits it in place; every
    /// other operation builds a new document from it.
    pub fn apply(&self, mut source: Document) -> Result<OperationOutput> {
        let output = match self {
            Self::InsertBlank { position, count } => {
                OperationOutput::Document(insert_blank_pages(&source, *position, *count)?)
            }
            Self::Delete { range } => OperationOutput::Document(delete_pages(&source, range)?),
            Self::Extract { range } => OperationOutput::Pages(extract_pages(&source, range)?),
            Self::Reverse => OperationOutput::Document(reverse_pages(&source)?),
            Self::Split { mode } => OperationOutput::Document(split_pages_in_half(&source, *mode)?),
            Self::Rotate { rotation, range } => {
                OperationOutput::Document(rotate_pages(&source, *rotation, range.as_deref())?)
            }
            Self::Organize { steps, mode } => {
                let mut order = PageOrder::new(source.page_count(), *mode)?;
                apply_steps(&mut order, steps)?;
                OperationOutput::Document(organize_pages(&source, &order)?)
            }
            Self::Scrub => {
                let report = MetadataScrubber::new().scrub(&mut source)?;
                OperationOutput::Scrubbed {
                    document: source,
                    report,
                }
            }
        };
        Ok(output)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertBlank { position, count } => {
                write!(f, "insert {count} blank page(s) at position {position}")
            }
            Self::Delete { range } => write!(f, "delete pages {range}"),
            Self::Extract { range } => write!(f, "extract pages {range}"),
            Self::Reverse => f.write_str("reverse page order"),
            Self::Split { mode } => write!(f, "split pages in half ({mode})"),
            Self::Rotate { rotation, range } => match range {
                Some(range) => write!(f, "rotate pages {range} by {rotation}"),
                None => write!(f, "rotate all pages by {rotation}"),
            },
            Self::Organize { steps, .. } => write!(f, "organize pages ({} step(s))", steps.len()),
            Self::Scrub => f.write_str("scrub metadata"),
        }
    }
}
