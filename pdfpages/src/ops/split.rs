//! Splitting every page into two halves.
//!
//! Each source page is copied twice and each copy is cropped to one half of
//! the page. Page content is not altered; only the visible region changes.

use std::fmt;
use std::str::FromStr;

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{DocumentBuilder, PageBox, PageGeometry};

/// Direction of the cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Cut down the middle into left then right halves.
    #[default]
    Vertical,
    /// Cut across the middle into top then bottom halves.
    Horizontal,
}

impl SplitMode {
    /// The two halves of `media`, in output order.
    pub fn halves(self, media: PageBox) -> (PageBox, PageBox) {
        let PageBox {
            x,
            y,
            width,
            height,
        } = media;

        match self {
            Self::Vertical => {
                let half = width / 2.0;
                (
                    PageBox::new(x, y, half, height),
                    PageBox::new(x + half, y, half, height),
                )
            }
            Self::Horizontal => {
                let half = height / 2.0;
                (
                    PageBox::new(x, y + half, width, half),
                    PageBox::new(x, y, width, half),
                )
            }
        }
    }
}

impl FromStr for SplitMode {
    type Err = PdfPagesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "vertical" | "v" => Ok(Self::Vertical),
            "horizontal" | "h" => Ok(Self::Horizontal),
            _ => Err(PdfPagesError::invalid_config(format!(
                "Invalid split mode: {s}. Must be one of: vertical, horizontal"
            ))),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Turn every page into two, each cropped to one half.
///
/// Output order is `[A1, B1, A2, B2, ...]` where A is the left (vertical) or
/// top (horizontal) half.
///
/// # Errors
///
/// Returns [`PdfPagesError::EmptyPageOrder`] for a document without pages.
pub fn split_pages_in_half(source: &Document, mode: SplitMode) -> Result<Document> {
    let page_count = source.page_count();
    debug!(page_count, %mode, "splitting pages in half");

    let mut builder = DocumentBuilder::for_source(source);
    for index in 0..page_count {
        let (first, second) = mode.halves(source.media_box(index)?);

        let page_id = builder.copy_page(source, index)?;
        builder.set_crop_region(page_id, first)?;

        let page_id = builder.copy_page(source, index)?;
        builder.set_crop_region(page_id, second)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{letter_document, page_labels, varied_document};
    use rstest::rstest;

    #[rstest]
    #[case(SplitMode::Vertical)]
    #[case(SplitMode::Horizontal)]
    fn test_split_pairs(#[case] mode: SplitMode) {
        let source = varied_document(3);
        let result = split_pages_in_half(&source, mode).unwrap();

        assert_eq!(result.page_count(), 6);
        assert_eq!(
            page_labels(&result),
            vec!["Page 1", "Page 1", "Page 2", "Page 2", "Page 3", "Page 3"]
        );

        for k in 0..3 {
            let media = source.media_box(k).unwrap();
            let a = result.crop_box(2 * k).unwrap().unwrap();
            let b = result.crop_box(2 * k + 1).unwrap().unwrap();

            assert_eq!(result.media_box(2 * k).unwrap(), media);
            assert_eq!(result.media_box(2 * k + 1).unwrap(), media);
            assert_eq!(a.area() + b.area(), media.area());
            assert_eq!((a, b), mode.halves(media));
        }
    }

    #[test]
    fn test_vertical_halves() {
        let (left, right) = SplitMode::Vertical.halves(PageBox::new(0.0, 0.0, 612.0, 792.0));
        assert_eq!(left, PageBox::new(0.0, 0.0, 306.0, 792.0));
        assert_eq!(right, PageBox::new(306.0, 0.0, 306.0, 792.0));
    }

    #[test]
    fn test_horizontal_halves() {
        let (top, bottom) = SplitMode::Horizontal.halves(PageBox::new(0.0, 0.0, 612.0, 792.0));
        assert_eq!(top, PageBox::new(0.0, 396.0, 612.0, 396.0));
        assert_eq!(bottom, PageBox::new(0.0, 0.0, 612.0, 396.0));
    }

    #[test]
    fn test_halves_offset_by_media_origin() {
        let (left, right) = SplitMode::Vertical.halves(PageBox::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(left, PageBox::new(10.0, 20.0, 50.0, 50.0));
        assert_eq!(right, PageBox::new(60.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn test_split_empty_document() {
        let source = Document::with_version("1.7");
        assert!(matches!(
            split_pages_in_half(&source, SplitMode::Vertical),
            Err(PdfPagesError::EmptyPageOrder)
        ));
    }

    #[test]
    fn test_split_single_page() {
        let source = letter_document(1);
        let result = split_pages_in_half(&source, SplitMode::Horizontal).unwrap();
        assert_eq!(result.page_count(), 2);
    }

    #[rstest]
    #[case("vertical", SplitMode::Vertical)]
    #[case("H", SplitMode::Horizontal)]
    fn test_split_mode_from_str(#[case] input: &str, #[case] expected: SplitMode) {
        assert_eq!(input.parse::<SplitMode>().unwrap(), expected);
    }

    #[test]
    fn test_split_mode_from_str_invalid() {
        assert!("diagonal".parse::<SplitMode>().is_err());
    }
}
