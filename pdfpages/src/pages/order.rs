//! Editable page order for the organizer.
//!
//! A [`PageOrder`] is an ordered list of page descriptors over a source
//! document. Each descriptor points at a source page and carries a stable id,
//! so a page can be moved, duplicated or deleted by id while display numbers
//! are recomputed after every edit. [`PageOrder::to_output_order`] yields the
//! source indices to hand to [`rebuild`](crate::pages::rebuild).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{PdfPagesError, Result};

/// Stable identifier of one descriptor in a [`PageOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page slot in a [`PageOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    id: PageId,
    original_page_index: usize,
    display_number: usize,
}

impl PageDescriptor {
    /// Stable id of this slot.
    pub fn id(&self) -> &PageId {
        &self.id
    }

    /// Zero-based index of the source page shown in this slot.
    pub fn original_page_index(&self) -> usize {
        self.original_page_index
    }

    /// 1-based position of this slot in the current order.
    pub fn display_number(&self) -> usize {
        self.display_number
    }
}

/// What an organizer is allowed to do with pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageOrderMode {
    /// Move, duplicate and delete.
    #[default]
    Organize,
    /// Move and delete only.
    ReorderOnly,
}

impl PageOrderMode {
    /// Whether pages may be duplicated in this mode.
    pub fn allows_duplication(self) -> bool {
        matches!(self, Self::Organize)
    }
}

/// Ordered page descriptors over a source document.
///
/// Invariants held after every operation:
/// - at least one descriptor
/// - display numbers are exactly `1..=len` in list order
/// - ids are unique
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOrder {
    pages: Vec<PageDescriptor>,
    mode: PageOrderMode,
    source_page_count: usize,
    #[serde(skip)]
    session: u128,
    #[serde(skip)]
    next_serial: u64,
}

impl PageOrder {
    /// Create one descriptor per source page, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::EmptyPageOrder`] when `total_pages` is zero.
    pub fn new(total_pages: usize, mode: PageOrderMode) -> Result<Self> {
        if total_pages == 0 {
            return Err(PdfPagesError::EmptyPageOrder);
        }

        let session = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut order = Self {
            pages: Vec::with_capacity(total_pages),
            mode,
            source_page_count: total_pages,
            session,
            next_serial: 0,
        };

        for index in 0..total_pages {
            let id = order.fresh_id(index);
            order.pages.push(PageDescriptor {
                id,
                original_page_index: index,
                display_number: index + 1,
            });
        }

        Ok(order)
    }

    /// Descriptors in display order.
    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false; an order never drops below one page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Capabilities of this order.
    pub fn mode(&self) -> PageOrderMode {
        self.mode
    }

    /// Page count of the document this order was created for.
    pub fn source_page_count(&self) -> usize {
        self.source_page_count
    }

    /// Zero-based position of a descriptor.
    pub fn position(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &PageId) -> Option<&PageDescriptor> {
        self.pages.iter().find(|p| &p.id == id)
    }

    /// Id of the descriptor at a zero-based position.
    pub fn id_at(&self, position: usize) -> Option<&PageId> {
        self.pages.get(position).map(|p| &p.id)
    }

    /// Move `active` to the position currently held by `over`.
    ///
    /// The active descriptor is removed and reinserted at the over
    /// descriptor's former index, so dragging forward lands after it and
    /// dragging backward lands before it. Returns false and leaves the order
    /// untouched when the ids are equal or either is unknown.
    pub fn reorder(&mut self, active: &PageId, over: &PageId) -> bool {
        if active == over {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(active), self.position(over)) else {
            return false;
        };

        let moved = self.pages.remove(from);
        self.pages.insert(to, moved);
        self.renumber();
        true
    }

    /// Insert a copy of a page directly after it.
    ///
    /// Returns the new descriptor's id, or `None` when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::DuplicationDisabled`] in
    /// [`PageOrderMode::ReorderOnly`].
    pub fn duplicate(&mut self, id: &PageId) -> Result<Option<PageId>> {
        if !self.mode.allows_duplication() {
            return Err(PdfPagesError::DuplicationDisabled);
        }
        let Some(position) = self.position(id) else {
            return Ok(None);
        };

        let original_page_index = self.pages[position].original_page_index;
        let new_id = self.fresh_id(original_page_index);
        self.pages.insert(
            position + 1,
            PageDescriptor {
                id: new_id.clone(),
                original_page_index,
                display_number: 0,
            },
        );
        self.renumber();

        Ok(Some(new_id))
    }

    /// Remove a page.
    ///
    /// Returns false when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::CannotDeleteLastPage`] when `id` names the
    /// only page left.
    pub fn delete(&mut self, id: &PageId) -> Result<bool> {
        let Some(position) = self.position(id) else {
            return Ok(false);
        };
        if self.pages.len() <= 1 {
            return Err(PdfPagesError::CannotDeleteLastPage);
        }

        self.pages.remove(position);
        self.renumber();
        Ok(true)
    }

    /// Source page indices in display order, ready for rebuilding.
    pub fn to_output_order(&self) -> Vec<usize> {
        self.pages.iter().map(|p| p.original_page_index).collect()
    }

    fn fresh_id(&mut self, original_page_index: usize) -> PageId {
        let serial = self.next_serial;
        self.next_serial += 1;
        PageId(format!(
            "page-{original_page_index}-{}-{serial}",
            self.session
        ))
    }

    fn renumber(&mut self) {
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.display_number = index + 1;
        }
    }
}
