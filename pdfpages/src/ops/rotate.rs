//! Page rotation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{DocumentBuilder, PageGeometry, parse_page_range};

/// Page rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the degrees value is not 90, 180, or 270.
    pub fn from_degrees(degrees: u16) -> Result<Self> {
        match degrees {
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(PdfPagesError::invalid_config(format!(
                "Invalid rotation: {degrees}. Must be 90, 180, or 270"
            ))),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> u16 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }
}

impl FromStr for Rotation {
    type Err = PdfPagesError;

    fn from_str(s: &str) -> Result<Self> {
        let degrees: u16 = s.trim().parse().map_err(|_| {
            PdfPagesError::invalid_config(format!(
                "Invalid rotation: {s}. Must be 90, 180, or 270"
            ))
        })?;
        Self::from_degrees(degrees)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.as_degrees())
    }
}

/// Rotate the pages selected by `range` (every page when `None`).
///
/// The rotation is added to each page's current `/Rotate`, including one
/// inherited from the page tree.
pub fn rotate_pages(source: &Document, rotation: Rotation, range: Option<&str>) -> Result<Document> {
    let page_count = source.page_count();
    let selected: BTreeSet<usize> = match range {
        Some(range) => parse_page_range(range, page_count)?.into_iter().collect(),
        None => (0..page_count).collect(),
    };

    debug!(%rotation, pages = selected.len(), "rotating pages");

    let mut builder = DocumentBuilder::for_source(source);
    for index in 0..page_count {
        let page_id = builder.copy_page(source, index)?;
        if selected.contains(&index) {
            let current = builder.rotation(page_id)?;
            builder.set_rotation(page_id, current + i64::from(rotation.as_degrees()))?;
        }
    }
    builder.finish()
}
