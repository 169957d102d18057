//! Building new documents out of pages of existing ones.
//!
//! Every page operation in this crate ends in a [`DocumentBuilder`]: pages
//! are copied from a source in the requested order, blank pages are added
//! where needed, and [`DocumentBuilder::finish`] writes a fresh page tree and
//! catalog. The source is never modified.

use lopdf::{Document, Object, ObjectId, dictionary};
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::geometry::{INHERITABLE_KEYS, PageBox, PageGeometry, PageSize, inherited_attribute};
use crate::utils::copy_references;

/// Accumulates pages for a new document.
///
/// # Examples
///
/// ```no_run
/// # use pdfpages::pages::{DocumentBuilder, PageSize};
/// # fn example(source: &lopdf::Document) -> pdfpages::Result<()> {
/// let mut builder = DocumentBuilder::for_source(source);
/// builder.copy_page(source, 0)?;
/// builder.add_blank_page(PageSize::new(612.0, 792.0));
/// let document = builder.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct DocumentBuilder {
    target: Document,
    kids: Vec<ObjectId>,
}

impl DocumentBuilder {
    /// Start an empty PDF 1.7 document.
    pub fn new() -> Self {
        Self::with_version("1.7")
    }

    /// Start an empty document with the given header version.
    pub fn with_version(version: &str) -> Self {
        Self {
            target: Document::with_version(version),
            kids: Vec::new(),
        }
    }

    /// Start an empty document carrying the source's header version.
    ///
    /// The source's object numbers are reserved, so pages added before the
    /// first copy cannot take an id a copied object needs.
    pub fn for_source(source: &Document) -> Self {
        let mut builder = Self::with_version(&source.version);
        builder.target.max_id = source.max_id;
        builder
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Highest object number allocated in the document under construction.
    pub fn max_id(&self) -> u32 {
        self.target.max_id
    }

    /// Append a copy of the source page at `index`.
    ///
    /// Attributes the page inherits from its page tree are written onto the
    /// copy, so its size, crop, rotation and resources stay exactly as they
    /// render in the source. Objects the page references are shared between
    /// repeated copies of the same page; the page dictionary itself is new
    /// each time.
    ///
    /// Returns the object id of the new page.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::InvalidPageIndex`] when `index` is out of bounds.
    pub fn copy_page(&mut self, source: &Document, index: usize) -> Result<ObjectId> {
        // A page this builder made already sits on one of the source's ids.
        if self.kids.iter().any(|id| source.objects.contains_key(id)) {
            let mut source = source.clone();
            source.renumber_objects_with(self.target.max_id + 1);
            debug!(index, first_id = self.target.max_id + 1, "renumbered colliding source");
            return self.copy_page_from(&source, index);
        }
        self.copy_page_from(source, index)
    }

    fn copy_page_from(&mut self, source: &Document, index: usize) -> Result<ObjectId> {
        let source_id = source.page_id(index)?;
        let mut page = source
            .get_dictionary(source_id)
            .map_err(|e| {
                PdfPagesError::invalid_document(format!("page {} is unreadable: {e}", index + 1))
            })?
            .clone();

        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Some(value) = inherited_attribute(source, source_id, key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }
        page.remove(b"Parent");

        // Source object ids are reused for shared objects, so new ids must
        // be allocated above them.
        self.target.max_id = self.target.max_id.max(source.max_id);

        let page = Object::Dictionary(page);
        copy_references(&mut self.target, source, &page);
        let page_id = self.target.add_object(page);
        self.kids.push(page_id);

        Ok(page_id)
    }

    /// Append an empty page of the given size.
    pub fn add_blank_page(&mut self, size: PageSize) -> ObjectId {
        let media_box = PageBox::new(0.0, 0.0, size.width, size.height);
        let page_id = self.target.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.to_object(),
            "Resources" => dictionary! {},
        });
        self.kids.push(page_id);
        page_id
    }

    /// Restrict the visible region of a page added by this builder.
    pub fn set_crop_region(&mut self, page_id: ObjectId, region: PageBox) -> Result<()> {
        self.page_mut(page_id)?.set("CropBox", region.to_object());
        Ok(())
    }

    /// Set a page's `/Rotate` to `degrees`, normalized into `0..360`.
    pub fn set_rotation(&mut self, page_id: ObjectId, degrees: i64) -> Result<()> {
        self.page_mut(page_id)?
            .set("Rotate", Object::Integer(degrees.rem_euclid(360)));
        Ok(())
    }

    /// The current `/Rotate` of a page added by this builder.
    pub fn rotation(&self, page_id: ObjectId) -> Result<i64> {
        let page = self.target.get_dictionary(page_id)?;
        Ok(page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0))
    }

    fn page_mut(&mut self, page_id: ObjectId) -> Result<&mut lopdf::Dictionary> {
        if !self.kids.contains(&page_id) {
            return Err(PdfPagesError::other(format!(
                "object {} {} is not a page of this document",
                page_id.0, page_id.1
            )));
        }
        Ok(self.target.get_dictionary_mut(page_id)?)
    }

    /// Write the page tree and catalog and return the document.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::EmptyPageOrder`] when no pages were added.
    pub fn finish(mut self) -> Result<Document> {
        if self.kids.is_empty() {
            return Err(PdfPagesError::EmptyPageOrder);
        }

        let pages_id = self.target.new_object_id();
        for &kid in &self.kids {
            self.target
                .get_dictionary_mut(kid)?
                .set("Parent", Object::Reference(pages_id));
        }

        let kids: Vec<Object> = self.kids.iter().copied().map(Object::Reference).collect();
        self.target.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.kids.len() as i64,
            }),
        );

        let catalog_id = self.target.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.target.trailer.set("Root", catalog_id);

        Ok(self.target)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a new document whose page `i` is source page `order[i]`.
///
/// Indices may repeat and need not be ascending. The whole order is checked
/// before any page is copied.
///
/// # Errors
///
/// - [`PdfPagesError::EmptyPageOrder`] when `order` is empty
/// - [`PdfPagesError::InvalidPageIndex`] when an index is out of bounds
pub fn rebuild(source: &Document, order: &[usize]) -> Result<Document> {
    if order.is_empty() {
        return Err(PdfPagesError::EmptyPageOrder);
    }

    let page_count = source.page_count();
    if let Some(&index) = order.iter().find(|&&index| index >= page_count) {
        return Err(PdfPagesError::InvalidPageIndex { index, page_count });
    }

    debug!(pages = order.len(), source_pages = page_count, "rebuilding document");

    let mut builder = DocumentBuilder::for_source(source);
    for &index in order {
        builder.copy_page(source, index)?;
    }
    builder.finish()
}
