//! Multi-file processing and merging.

use pdfpages::batch::BatchProcessor;
use pdfpages::error::PdfPagesError;
use pdfpages::inspect::inspect;
use pdfpages::io::PdfReader;
use pdfpages::ops::{Operation, OperationOutput, merge_documents};
use tempfile::TempDir;

use crate::common::{build_document, letter_document, page_labels, write_pdf};

#[tokio::test]
async fn test_batch_extract_from_several_files() {
    let temp_dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(temp_dir.path(), "a.pdf", &letter_document(3)),
        write_pdf(temp_dir.path(), "b.pdf", &letter_document(1)),
    ];

    let operation = Operation::Extract {
        range: "1, 3".to_string(),
    };
    let items = BatchProcessor::new(2).run(&paths, &operation).await;

    let Ok(OperationOutput::Pages(first)) = &items[0].outcome else {
        panic!("expected extracted pages");
    };
    let numbers: Vec<usize> = first.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, [1, 3]);

    // Page 3 does not exist in b.pdf; page 1 still does.
    let Ok(OperationOutput::Pages(second)) = &items[1].outcome else {
        panic!("expected extracted pages");
    };
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].file_name(), "page-1.pdf");
}

#[tokio::test]
async fn test_batch_continues_past_bad_files() {
    let temp_dir = TempDir::new().unwrap();
    let garbage = temp_dir.path().join("garbage.pdf");
    std::fs::write(&garbage, b"%PDF-1.7 nothing else").unwrap();
    let good = write_pdf(temp_dir.path(), "good.pdf", &letter_document(2));

    let items = BatchProcessor::new(1)
        .run(&[garbage, good], &Operation::Reverse)
        .await;

    assert!(!items[0].is_ok());
    let Ok(OperationOutput::Document(doc)) = &items[1].outcome else {
        panic!("expected a document");
    };
    assert_eq!(page_labels(doc), ["Page 2", "Page 1"]);
}

#[tokio::test]
async fn test_merge_loaded_documents() {
    let temp_dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(temp_dir.path(), "a.pdf", &letter_document(2)),
        write_pdf(
            temp_dir.path(),
            "b.pdf",
            &build_document(&[(300.0, 300.0)]),
        ),
    ];

    let (results, _) = PdfReader::new().load_all(&paths, 2).await;
    let documents: Vec<_> = results.into_iter().map(|r| r.unwrap().document).collect();

    let merged = merge_documents(&documents).unwrap();
    assert_eq!(page_labels(&merged), ["Page 1", "Page 2", "Page 1"]);

    let info = inspect(&merged);
    assert_eq!(info.page_count, 3);
    assert!(!info.uniform_page_size());
    assert_eq!(info.pages[2].width, 300.0);
}

#[test]
fn test_merge_nothing_is_an_error() {
    assert!(matches!(
        merge_documents(&[]),
        Err(PdfPagesError::NoFilesToMerge)
    ));
}
