//! Document metadata reading and removal.
//!
//! [`MetadataScrubber`] strips everything that identifies who made a document
//! and with what: the info dictionary, the XMP stream, the trailer file
//! identifiers and application private data. Each category is handled
//! independently, so one damaged entry does not stop the others from being
//! removed.

use std::fmt;

use lopdf::{Dictionary, Document, Object};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PdfPagesError, Result};

/// Info dictionary keys defined by the PDF standard.
pub const STANDARD_INFO_FIELDS: [&str; 9] = [
    "Title",
    "Author",
    "Subject",
    "Keywords",
    "Creator",
    "Producer",
    "CreationDate",
    "ModDate",
    "Trapped",
];

/// A kind of metadata the scrubber removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetadataCategory {
    /// Standard info dictionary fields.
    StandardFields,
    /// Any other info dictionary entry.
    InfoDictionary,
    /// Catalog `/Metadata` XMP stream.
    Xmp,
    /// Trailer `/ID` file identifiers.
    DocumentId,
    /// Catalog `/PieceInfo` application data.
    PieceInfo,
}

impl fmt::Display for MetadataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StandardFields => "standard info fields",
            Self::InfoDictionary => "info dictionary",
            Self::Xmp => "XMP metadata",
            Self::DocumentId => "document ID",
            Self::PieceInfo => "page-piece data",
        };
        f.write_str(name)
    }
}

/// A category that could not be removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubFailure {
    /// The category.
    pub category: MetadataCategory,
    /// Why removal failed.
    pub reason: String,
}

/// Outcome of [`MetadataScrubber::scrub`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubReport {
    /// Categories that were present and removed.
    pub removed: Vec<MetadataCategory>,
    /// Categories that could not be removed.
    pub failed: Vec<ScrubFailure>,
    /// Number of info dictionary entries deleted.
    pub info_entries_removed: usize,
}

impl ScrubReport {
    /// True when no category failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when nothing was found to remove.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.failed.is_empty()
    }

    fn record(&mut self, category: MetadataCategory, outcome: Result<usize>) {
        match outcome {
            Ok(0) => {}
            Ok(count) => {
                debug!(%category, count, "removed metadata");
                self.removed.push(category);
            }
            Err(err) => {
                warn!(%category, error = %err, "failed to remove metadata");
                self.failed.push(ScrubFailure {
                    category,
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Removes identifying metadata from documents.
#[derive(Debug, Clone, Default)]
pub struct MetadataScrubber;

impl MetadataScrubber {
    /// Create a new scrubber.
    pub fn new() -> Self {
        Self
    }

    /// Remove all metadata from `doc` in place.
    ///
    /// Absent categories are skipped silently. A category that is present
    /// but malformed is logged and recorded in the report's `failed` list;
    /// the remaining categories are still processed.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPagesError::InvalidDocument`] only when the document has
    /// no catalog.
    pub fn scrub(&self, doc: &mut Document) -> Result<ScrubReport> {
        if let Err(err) = doc.catalog() {
            return Err(PdfPagesError::invalid_document(format!(
                "document has no catalog: {err}"
            )));
        }

        let mut report = ScrubReport::default();

        let standard = clear_standard_fields(doc);
        let info = clear_info_dictionary(doc);
        if let Ok(count) = &standard {
            report.info_entries_removed += count;
        }
        if let Ok(count) = &info {
            report.info_entries_removed += count;
        }
        report.record(MetadataCategory::StandardFields, standard);
        report.record(MetadataCategory::InfoDictionary, info);
        report.record(MetadataCategory::Xmp, remove_xmp(doc));
        report.record(MetadataCategory::DocumentId, remove_document_id(doc));
        report.record(MetadataCategory::PieceInfo, remove_piece_info(doc));

        Ok(report)
    }
}

fn clear_standard_fields(doc: &mut Document) -> Result<usize> {
    let Some(info) = info_dictionary_mut(doc)? else {
        return Ok(0);
    };

    Ok(STANDARD_INFO_FIELDS
        .iter()
        .filter(|key| info.remove(key.as_bytes()).is_some())
        .count())
}

fn clear_info_dictionary(doc: &mut Document) -> Result<usize> {
    let Some(info) = info_dictionary_mut(doc)? else {
        return Ok(0);
    };

    // Collect first; the dictionary cannot be edited while iterating it.
    let keys: Vec<Vec<u8>> = info.iter().map(|(key, _)| key.clone()).collect();
    for key in &keys {
        info.remove(key);
    }
    Ok(keys.len())
}

fn remove_xmp(doc: &mut Document) -> Result<usize> {
    let Some(metadata) = doc.catalog_mut()?.remove(b"Metadata") else {
        return Ok(0);
    };
    if let Object::Reference(id) = metadata {
        doc.objects.remove(&id);
    }
    Ok(1)
}

fn remove_document_id(doc: &mut Document) -> Result<usize> {
    Ok(usize::from(doc.trailer.remove(b"ID").is_some()))
}

fn remove_piece_info(doc: &mut Document) -> Result<usize> {
    Ok(usize::from(doc.catalog_mut()?.remove(b"PieceInfo").is_some()))
}

/// The info dictionary, whether stored inline in the trailer or indirectly.
fn info_dictionary_mut(doc: &mut Document) -> Result<Option<&mut Dictionary>> {
    let info_ref = match doc.trailer.get(b"Info") {
        Err(_) => return Ok(None),
        Ok(Object::Reference(id)) => Some(*id),
        Ok(Object::Dictionary(_)) => None,
        Ok(other) => {
            return Err(PdfPagesError::invalid_document(format!(
                "trailer /Info is not a dictionary: {other:?}"
            )));
        }
    };

    let info = match info_ref {
        Some(id) => doc.get_object_mut(id).and_then(Object::as_dict_mut),
        None => doc.trailer.get_mut(b"Info").and_then(Object::as_dict_mut),
    };
    info.map(Some)
        .map_err(|e| PdfPagesError::invalid_document(format!("info dictionary is unusable: {e}")))
}

/// Metadata currently present in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Document title.
    pub title: Option<String>,
    /// Author.
    pub author: Option<String>,
    /// Subject.
    pub subject: Option<String>,
    /// Keywords.
    pub keywords: Option<String>,
    /// Application that created the original content.
    pub creator: Option<String>,
    /// Application that wrote the PDF.
    pub producer: Option<String>,
    /// Creation date as stored, e.g. `D:20240101120000Z`.
    pub creation_date: Option<String>,
    /// Last modification date as stored.
    pub mod_date: Option<String>,
    /// Number of info dictionary entries of any kind.
    pub info_entries: usize,
    /// Whether an XMP stream is attached to the catalog.
    pub has_xmp: bool,
    /// Whether the trailer carries file identifiers.
    pub has_document_id: bool,
    /// Whether the catalog carries application private data.
    pub has_piece_info: bool,
}

impl DocumentMetadata {
    /// True when no identifying metadata is present.
    pub fn is_clean(&self) -> bool {
        self.info_entries == 0 && !self.has_xmp && !self.has_document_id && !self.has_piece_info
    }
}

/// Read the metadata of a document without modifying it.
pub fn read_metadata(doc: &Document) -> DocumentMetadata {
    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };
    let field = |key: &str| info.and_then(|dict| text_field(doc, dict, key));
    let catalog = doc.catalog().ok();

    DocumentMetadata {
        title: field("Title"),
        author: field("Author"),
        subject: field("Subject"),
        keywords: field("Keywords"),
        creator: field("Creator"),
        producer: field("Producer"),
        creation_date: field("CreationDate"),
        mod_date: field("ModDate"),
        info_entries: info.map_or(0, |dict| dict.len()),
        has_xmp: catalog.is_some_and(|c| c.has(b"Metadata")),
        has_document_id: doc.trailer.has(b"ID"),
        has_piece_info: catalog.is_some_and(|c| c.has(b"PieceInfo")),
    }
}

fn text_field(doc: &Document, dict: &Dictionary, key: &str) -> Option<String> {
    let value = match dict.get(key.as_bytes()).ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        value => value,
    };
    match value {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE with a byte order mark, else one byte per char.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
