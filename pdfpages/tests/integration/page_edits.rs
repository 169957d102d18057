//! Page edits applied to documents that went through disk.

use pdfpages::PageGeometry;
use pdfpages::error::PdfPagesError;
use pdfpages::io::{PdfReader, PdfWriter};
use pdfpages::ops::{
    Rotation, SplitMode, delete_pages, extract_pages, insert_blank_pages, reverse_pages,
    rotate_pages, split_pages_in_half,
};
use pdfpages::pages::PageBox;
use tempfile::TempDir;

use crate::common::{build_document, letter_document, page_labels, page_rotation, write_pdf};

async fn save_and_reload(doc: &lopdf::Document, dir: &TempDir, name: &str) -> lopdf::Document {
    let path = dir.path().join(name);
    PdfWriter::new().save(doc, &path).await.unwrap();
    PdfReader::new().load(&path).await.unwrap().document
}

#[tokio::test]
async fn test_delete_pages_survives_save() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "in.pdf", &letter_document(5));
    let source = PdfReader::new().load(&input).await.unwrap().document;

    let trimmed = delete_pages(&source, "2, 4").unwrap();
    let reloaded = save_and_reload(&trimmed, &temp_dir, "out.pdf").await;

    assert_eq!(page_labels(&reloaded), ["Page 1", "Page 3", "Page 5"]);
    assert_eq!(source.page_count(), 5);
}

#[tokio::test]
async fn test_delete_everything_is_rejected() {
    let source = letter_document(3);

    assert!(matches!(
        delete_pages(&source, "1-3"),
        Err(PdfPagesError::CannotDeleteAllPages { page_count: 3 })
    ));
    assert!(matches!(
        delete_pages(&source, "7-9"),
        Err(PdfPagesError::NoValidPages { .. })
    ));
}

#[tokio::test]
async fn test_insert_blank_pages_survives_save() {
    let temp_dir = TempDir::new().unwrap();
    let source = build_document(&[(400.0, 500.0), (612.0, 792.0), (612.0, 792.0)]);

    let expanded = insert_blank_pages(&source, 1, 2).unwrap();
    let reloaded = save_and_reload(&expanded, &temp_dir, "out.pdf").await;

    assert_eq!(
        page_labels(&reloaded),
        ["Page 1", "blank", "blank", "Page 2", "Page 3"]
    );
    let blank = reloaded.media_box(1).unwrap();
    assert_eq!((blank.width, blank.height), (400.0, 500.0));
}

#[tokio::test]
async fn test_insert_blank_pages_at_start_survives_save() {
    let temp_dir = TempDir::new().unwrap();
    let source = letter_document(2);

    let expanded = insert_blank_pages(&source, 0, 4).unwrap();
    let reloaded = save_and_reload(&expanded, &temp_dir, "out.pdf").await;

    assert_eq!(
        page_labels(&reloaded),
        ["blank", "blank", "blank", "blank", "Page 1", "Page 2"]
    );
    for index in [4, 5] {
        let page = reloaded
            .get_dictionary(reloaded.page_id(index).unwrap())
            .unwrap();
        let font_id = page
            .get(b"Resources")
            .and_then(lopdf::Object::as_dict)
            .and_then(|resources| resources.get(b"Font"))
            .and_then(lopdf::Object::as_dict)
            .and_then(|fonts| fonts.get(b"F1"))
            .and_then(lopdf::Object::as_reference)
            .unwrap();
        let font = reloaded.get_dictionary(font_id).unwrap();
        assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");
    }
}

#[tokio::test]
async fn test_extract_pages_to_files() {
    let temp_dir = TempDir::new().unwrap();
    let source = letter_document(4);

    let pages = extract_pages(&source, "4, 2").unwrap();
    assert_eq!(pages.len(), 2);

    for page in &pages {
        let path = temp_dir.path().join(page.file_name());
        PdfWriter::new().save(&page.document, &path).await.unwrap();
    }

    let second = PdfReader::new()
        .load(&temp_dir.path().join("page-2.pdf"))
        .await
        .unwrap();
    let fourth = PdfReader::new()
        .load(&temp_dir.path().join("page-4.pdf"))
        .await
        .unwrap();
    assert_eq!(page_labels(&second.document), ["Page 2"]);
    assert_eq!(page_labels(&fourth.document), ["Page 4"]);
}

#[tokio::test]
async fn test_reverse_twice_restores_order() {
    let temp_dir = TempDir::new().unwrap();
    let source = letter_document(4);

    let reversed = save_and_reload(&reverse_pages(&source).unwrap(), &temp_dir, "r.pdf").await;
    assert_eq!(
        page_labels(&reversed),
        ["Page 4", "Page 3", "Page 2", "Page 1"]
    );

    let restored = reverse_pages(&reversed).unwrap();
    assert_eq!(page_labels(&restored), page_labels(&source));
}

#[tokio::test]
async fn test_split_keeps_crop_boxes_after_save() {
    let temp_dir = TempDir::new().unwrap();
    let source = letter_document(2);

    let split = split_pages_in_half(&source, SplitMode::Horizontal).unwrap();
    let reloaded = save_and_reload(&split, &temp_dir, "split.pdf").await;

    assert_eq!(
        page_labels(&reloaded),
        ["Page 1", "Page 1", "Page 2", "Page 2"]
    );
    assert_eq!(
        reloaded.crop_box(0).unwrap(),
        Some(PageBox::new(0.0, 396.0, 612.0, 396.0))
    );
    assert_eq!(
        reloaded.crop_box(1).unwrap(),
        Some(PageBox::new(0.0, 0.0, 612.0, 396.0))
    );
}

#[tokio::test]
async fn test_rotate_selected_pages_after_save() {
    let temp_dir = TempDir::new().unwrap();
    let source = letter_document(3);

    let rotated = rotate_pages(&source, Rotation::Clockwise270, Some("2-3")).unwrap();
    let reloaded = save_and_reload(&rotated, &temp_dir, "rotated.pdf").await;

    assert_eq!(page_rotation(&reloaded, 0), 0);
    assert_eq!(page_rotation(&reloaded, 1), 270);
    assert_eq!(page_rotation(&reloaded, 2), 270);
}
