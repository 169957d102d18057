//! Page lookup and geometry for loaded documents.
//!
//! [`PageGeometry`] is implemented for [`lopdf::Document`] and is the only way
//! the rest of the crate asks a document about its pages. Attributes a page
//! may inherit from its ancestors in the page tree (`MediaBox`, `CropBox`,
//! `Resources`, `Rotate`) are resolved here.

use lopdf::{Dictionary, Document, Object, ObjectId};
use serde::{Deserialize, Serialize};

use crate::error::{PdfPagesError, Result};

/// Page attributes that a page inherits from its parent `Pages` nodes.
pub(crate) const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Width and height of a page in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl PageSize {
    /// Create a page size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in page space, as used by `MediaBox` and `CropBox`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl PageBox {
    /// Create a rectangle from its origin and extent.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Read a rectangle from a PDF `[llx lly urx ury]` array.
    ///
    /// Corners may be given in any order; the result is normalized.
    pub fn from_object(object: &Object) -> Option<Self> {
        let values = object.as_array().ok()?;
        if values.len() != 4 {
            return None;
        }

        let mut coords = [0f32; 4];
        for (slot, value) in coords.iter_mut().zip(values) {
            *slot = value.as_float().ok()?;
        }

        let [x1, y1, x2, y2] = coords;
        Some(Self::new(
            x1.min(x2),
            y1.min(y2),
            (x2 - x1).abs(),
            (y2 - y1).abs(),
        ))
    }

    /// Convert to a PDF `[llx lly urx ury]` array.
    pub fn to_object(self) -> Object {
        Object::Array(vec![
            Object::Real(self.x),
            Object::Real(self.y),
            Object::Real(self.x + self.width),
            Object::Real(self.y + self.height),
        ])
    }

    /// Size of the rectangle.
    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }

    /// Area of the rectangle in square points.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Page-level queries on a loaded document.
pub trait PageGeometry {
    /// Number of pages reachable from the page tree.
    fn page_count(&self) -> usize;

    /// Object ids of all pages, in page order.
    fn page_ids(&self) -> Vec<ObjectId>;

    /// Object id of the page at a zero-based index.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::InvalidPageIndex`] when `index` is out of bounds.
    fn page_id(&self, index: usize) -> Result<ObjectId>;

    /// The page's media box, resolved through page-tree inheritance.
    fn media_box(&self, index: usize) -> Result<PageBox>;

    /// The page's crop box if one is set on the page or an ancestor.
    fn crop_box(&self, index: usize) -> Result<Option<PageBox>>;

    /// The page's size in points, taken from its media box.
    fn page_size(&self, index: usize) -> Result<PageSize> {
        Ok(self.media_box(index)?.size())
    }
}

impl PageGeometry for Document {
    fn page_count(&self) -> usize {
        self.get_pages().len()
    }

    fn page_ids(&self) -> Vec<ObjectId> {
        self.get_pages().into_values().collect()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        let pages = self.get_pages();
        let page_count = pages.len();
        pages
            .into_values()
            .nth(index)
            .ok_or(PdfPagesError::InvalidPageIndex { index, page_count })
    }

    fn media_box(&self, index: usize) -> Result<PageBox> {
        let page_id = self.page_id(index)?;
        inherited_attribute(self, page_id, b"MediaBox")
            .and_then(PageBox::from_object)
            .ok_or_else(|| {
                PdfPagesError::invalid_document(format!(
                    "page {} has no usable MediaBox",
                    index + 1
                ))
            })
    }

    fn crop_box(&self, index: usize) -> Result<Option<PageBox>> {
        let page_id = self.page_id(index)?;
        Ok(inherited_attribute(self, page_id, b"CropBox").and_then(PageBox::from_object))
    }
}

/// Look up `key` on a page, walking up the `Parent` chain until it is found.
///
/// Indirect values are resolved one level so callers see the actual array or
/// dictionary rather than a reference.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node: &Dictionary = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(resolve(doc, value));
        }

        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }

    None
}

/// Follow a single indirect reference, returning the object itself otherwise.
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}
