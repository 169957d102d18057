//! Page selection, ordering and document rebuilding.

pub mod geometry;
pub mod order;
pub mod range;
pub mod rebuild;

pub use geometry::{PageBox, PageGeometry, PageSize};
pub use order::{PageDescriptor, PageId, PageOrder, PageOrderMode};
pub use range::{format_page_range, parse_page_range};
pub use rebuild::{DocumentBuilder, rebuild};
