//! Reversal and organizer-driven reordering.

use std::fmt;
use std::str::FromStr;

use lopdf::Document;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::{PageGeometry, PageOrder, rebuild};

/// Reverse the page order.
///
/// # Errors
///
/// Returns [`PdfPagesError::EmptyPageOrder`] for a document without pages.
pub fn reverse_pages(source: &Document) -> Result<Document> {
    let order: Vec<usize> = (0..source.page_count()).rev().collect();
    rebuild(source, &order)
}

/// Rebuild `source` in the order held by an organizer.
///
/// # Errors
///
/// Returns [`PdfPagesError::InvalidPageIndex`] when the order refers to pages
/// the source does not have, e.g. an order built for a different document.
pub fn organize_pages(source: &Document, order: &PageOrder) -> Result<Document> {
    debug!(
        pages = order.len(),
        source_pages = order.source_page_count(),
        "saving organized page order"
    );
    rebuild(source, &order.to_output_order())
}

/// One organizer edit, with 1-based positions in the current order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrganizeStep {
    /// Drag the page at `from` onto the page at `to`.
    Move {
        /// Position of the page being moved.
        from: usize,
        /// Position it is dropped on.
        to: usize,
    },
    /// Duplicate the page at this position.
    Duplicate(usize),
    /// Delete the page at this position.
    Delete(usize),
}

impl FromStr for OrganizeStep {
    type Err = PdfPagesError;

    /// Parse `move=FROM:TO`, `duplicate=N` or `delete=N`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            PdfPagesError::invalid_config(format!(
                "Invalid organize step '{s}'. Expected move=FROM:TO, duplicate=N or delete=N"
            ))
        };
        let number = |value: &str| value.trim().parse::<usize>().map_err(|_| invalid());

        let (action, value) = s.split_once('=').ok_or_else(invalid)?;
        match action.trim().to_lowercase().as_str() {
            "move" => {
                let (from, to) = value.split_once(':').ok_or_else(invalid)?;
                Ok(Self::Move {
                    from: number(from)?,
                    to: number(to)?,
                })
            }
            "duplicate" => Ok(Self::Duplicate(number(value)?)),
            "delete" => Ok(Self::Delete(number(value)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for OrganizeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { from, to } => write!(f, "move={from}:{to}"),
            Self::Duplicate(position) => write!(f, "duplicate={position}"),
            Self::Delete(position) => write!(f, "delete={position}"),
        }
    }
}

/// Apply organizer edits in sequence.
///
/// # Errors
///
/// - [`PdfPagesError::InvalidConfig`] when a step names a position that does
///   not exist at the time it runs
/// - Errors from the order itself, e.g. deleting the last page
pub fn apply_steps(order: &mut PageOrder, steps: &[OrganizeStep]) -> Result<()> {
    for step in steps {
        match *step {
            OrganizeStep::Move { from, to } => {
                let active = step_target(order, step, from)?;
                let over = step_target(order, step, to)?;
                order.reorder(&active, &over);
            }
            OrganizeStep::Duplicate(position) => {
                let id = step_target(order, step, position)?;
                order.duplicate(&id)?;
            }
            OrganizeStep::Delete(position) => {
                let id = step_target(order, step, position)?;
                order.delete(&id)?;
            }
        }
        debug!(%step, order = ?order.to_output_order(), "applied organize step");
    }
    Ok(())
}

fn step_target(
    order: &PageOrder,
    step: &OrganizeStep,
    position: usize,
) -> Result<crate::pages::PageId> {
    position
        .checked_sub(1)
        .and_then(|index| order.id_at(index))
        .cloned()
        .ok_or_else(|| {
            PdfPagesError::invalid_config(format!(
                "Step '{step}' refers to position {position}, but the order has {} page(s)",
                order.len()
            ))
        })
}
