//! Helpers shared by the integration tests.
//!
//! Documents are built in memory with lopdf and written to temporary
//! directories, so no fixture files are needed.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use pdfpages::PageGeometry;
use std::path::{Path, PathBuf};

/// Build a document with one page per entry in `sizes`.
///
/// Page `n` draws the text `Page n`, which [`page_label`] reads back.
pub fn build_document(sizes: &[(f32, f32)]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for (index, (width, height)) in sizes.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 72 Td (Page {}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(*width), Object::Real(*height)],
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => sizes.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// A document of `pages` US Letter pages.
pub fn letter_document(pages: usize) -> Document {
    build_document(&vec![(612.0, 792.0); pages])
}

/// A letter document carrying every kind of metadata the scrubber handles.
pub fn document_with_metadata(pages: usize) -> Document {
    let mut doc = letter_document(pages);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Quarterly report"),
        "Author" => Object::string_literal("J. Doe"),
        "Producer" => Object::string_literal("Office Suite 9"),
        "CreationDate" => Object::string_literal("D:20240101120000Z"),
        "Company" => Object::string_literal("Example Corp"),
    });
    doc.trailer.set("Info", info_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal("0123456789abcdef"),
            Object::string_literal("0123456789abcdef"),
        ],
    );

    let xmp_id = doc.add_object(Stream::new(
        dictionary! { "Type" => "Metadata", "Subtype" => "XML" },
        b"<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"/>".to_vec(),
    ));
    let catalog = doc.catalog_mut().unwrap();
    catalog.set("Metadata", xmp_id);
    catalog.set(
        "PieceInfo",
        dictionary! { "App" => dictionary! { "LastModified" => Object::string_literal("D:2024") } },
    );

    doc
}

/// Serialize `doc` into `dir/name` and return the path.
pub fn write_pdf(dir: &Path, name: &str, doc: &Document) -> PathBuf {
    let path = dir.join(name);
    let mut doc = doc.clone();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Read a document back from disk.
pub fn read_pdf(path: &Path) -> Document {
    Document::load_mem(&std::fs::read(path).unwrap()).unwrap()
}

/// The `Page n` label drawn on a page, or `None` for a page without content.
pub fn page_label(doc: &Document, index: usize) -> Option<String> {
    let page_id = doc.page_id(index).unwrap();
    let contents_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .and_then(Object::as_reference)
        .ok()?;
    let stream = doc.get_object(contents_id).ok()?.as_stream().ok()?;
    let bytes = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let text = String::from_utf8_lossy(&bytes);

    let start = text.find('(')? + 1;
    let end = text.find(')')?;
    Some(text[start..end].to_string())
}

/// Labels of every page in order, `"blank"` for pages without content.
pub fn page_labels(doc: &Document) -> Vec<String> {
    (0..doc.page_count())
        .map(|i| page_label(doc, i).unwrap_or_else(|| "blank".to_string()))
        .collect()
}

/// The `/Rotate` value of a page, 0 when absent.
pub fn page_rotation(doc: &Document, index: usize) -> i64 {
    let page_id = doc.page_id(index).unwrap();
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"Rotate")
        .and_then(Object::as_i64)
        .unwrap_or(0)
}
