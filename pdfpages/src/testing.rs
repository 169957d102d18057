//! Document fixtures shared by the unit tests.

use lopdf::{Document, Object, Stream, dictionary};

use crate::pages::PageGeometry;

/// Build a document with one page per entry in `sizes`.
///
/// Page `n` (1-based) draws the text `Page n`, which [`page_label`] reads back.
/// Resources live on the root `Pages` node so copies must resolve inheritance.
pub(crate) fn sample_document(sizes: &[(f32, f32)]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for (index, (width, height)) in sizes.iter().enumerate() {
        let content = format!("BT /F1 12 Tf 72 72 Td (Page {}) Tj ET", index + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(*width), Object::Real(*height)],
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
            "Resources" => resources_id,
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
pub(crate) fn letter_document(pages: usize) -> Document {
    sample_document(&vec![(612.0, 792.0); pages])
}

/// A document whose pages all have distinct sizes, so copies can be traced.
pub(crate) fn varied_document(pages: usize) -> Document {
    let sizes: Vec<(f32, f32)> = (0..pages)
        .map(|i| (300.0 + 10.0 * i as f32, 400.0 + 20.0 * i as f32))
        .collect();
    sample_document(&sizes)
}

/// The `Page n` label drawn on a page, read back from its content stream.
pub(crate) fn page_label(doc: &Document, index: usize) -> String {
    let page_id = doc.page_id(index).unwrap();
    let contents_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .and_then(Object::as_reference)
        .unwrap();
    let stream = doc.get_object(contents_id).unwrap().as_stream().unwrap();
    let bytes = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    let text = String::from_utf8_lossy(&bytes);

    let start = text.find('(').unwrap() + 1;
    let end = text.find(')').unwrap();
    text[start..end].to_string()
}

/// Labels of every page in order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    (0..doc.page_count()).map(|i| page_label(doc, i)).collect()
}
