//! Document inspection.
//!
//! [`inspect`] summarizes a loaded document: version, page geometry and
//! what metadata it carries. The report serializes to camelCase JSON for
//! the `info --json` command.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::inspect::inspect;
//!
//! # fn example(doc: &lopdf::Document) {
//! let info = inspect(doc);
//! println!("{} pages, PDF {}", info.page_count, info.version);
//! # }
//! ```

use std::path::{Path, PathBuf};

use lopdf::Document;
use serde::Serialize;

use crate::metadata::{DocumentMetadata, read_metadata};
use crate::pages::{PageBox, PageGeometry};

/// Geometry of one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,

    /// Width in points, from the media box.
    pub width: f32,

    /// Height in points, from the media box.
    pub height: f32,

    /// Crop box, when one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_box: Option<PageBox>,
}

/// Summary of a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Source path, when inspected from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Header version, e.g. `1.7`.
    pub version: String,

    /// Number of pages.
    pub page_count: usize,

    /// Per-page geometry. Pages whose media box cannot be read are left out.
    pub pages: Vec<PageInfo>,

    /// Number of objects in the document.
    pub object_count: usize,

    /// Metadata present in the document.
    pub metadata: DocumentMetadata,
}

impl DocumentInfo {
    /// Attach the source path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    /// True when every page has the same size.
    pub fn uniform_page_size(&self) -> bool {
        self.pages
            .windows(2)
            .all(|w| w[0].width == w[1].width && w[0].height == w[1].height)
    }
}

/// Summarize a document without modifying it.
pub fn inspect(doc: &Document) -> DocumentInfo {
    let page_count = doc.page_count();
    let pages = (0..page_count)
        .filter_map(|index| {
            let media = doc.media_box(index).ok()?;
            Some(PageInfo {
                number: index + 1,
                width: media.width,
                height: media.height,
                crop_box: doc.crop_box(index).ok().flatten(),
            })
        })
        .collect();

    DocumentInfo {
        path: None,
        version: doc.version.clone(),
        page_count,
        pages,
        object_count: doc.objects.len(),
        metadata: read_metadata(doc),
    }
}
