//! Metadata scrubbing on documents read from disk.

use pdfpages::io::{PdfReader, PdfWriter};
use pdfpages::metadata::{MetadataCategory, read_metadata};
use pdfpages::ops::{Operation, OperationOutput};
use tempfile::TempDir;

use crate::common::{document_with_metadata, letter_document, page_labels, read_pdf, write_pdf};

#[tokio::test]
async fn test_scrub_removes_all_categories() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_pdf(temp_dir.path(), "in.pdf", &document_with_metadata(2));

    let loaded = PdfReader::new().load(&input).await.unwrap();
    let before = read_metadata(&loaded.document);
    assert_eq!(before.title.as_deref(), Some("Quarterly report"));
    assert_eq!(before.author.as_deref(), Some("J. Doe"));
    assert_eq!(before.info_entries, 5);
    assert!(before.has_xmp && before.has_document_id && before.has_piece_info);

    let OperationOutput::Scrubbed { document, report } =
        Operation::Scrub.apply(loaded.document).unwrap()
    else {
        panic!("scrub should report what it removed");
    };

    assert!(report.is_complete());
    assert_eq!(report.info_entries_removed, 5);
    for category in [
        MetadataCategory::StandardFields,
        MetadataCategory::InfoDictionary,
        MetadataCategory::Xmp,
        MetadataCategory::DocumentId,
        MetadataCategory::PieceInfo,
    ] {
        assert!(report.removed.contains(&category), "{category} not removed");
    }

    let output = temp_dir.path().join("clean.pdf");
    PdfWriter::new().save(&document, &output).await.unwrap();

    let reloaded = read_pdf(&output);
    assert!(read_metadata(&reloaded).is_clean());
    assert_eq!(page_labels(&reloaded), ["Page 1", "Page 2"]);
}

#[test]
fn test_scrub_clean_document_reports_nothing() {
    let OperationOutput::Scrubbed { report, .. } =
        Operation::Scrub.apply(letter_document(1)).unwrap()
    else {
        panic!("scrub should report what it removed");
    };

    assert!(report.is_empty());
    assert_eq!(report.info_entries_removed, 0);
}
