//! Reader and writer behavior against real files.

use pdfpages::config::CompressionLevel;
use pdfpages::error::PdfPagesError;
use pdfpages::io::{PdfReader, PdfWriter, WriteOptions, load_pdf, save_pdf};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{letter_document, page_labels, write_pdf};

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_every_compression_level_reloads(#[case] compression: CompressionLevel) {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.pdf");

    let stats = PdfWriter::with_compression(compression)
        .save(&letter_document(3), &output)
        .await
        .unwrap();
    assert_eq!(stats.compression, compression);
    assert!(stats.file_size > 0);

    let reloaded = load_pdf(&output).await.unwrap();
    assert_eq!(page_labels(&reloaded), ["Page 1", "Page 2", "Page 3"]);
}

#[tokio::test]
async fn test_atomic_save_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.pdf");

    save_pdf(&letter_document(1), &output).await.unwrap();

    let names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["out.pdf"]);
}

#[tokio::test]
async fn test_non_atomic_save_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let output = write_pdf(temp_dir.path(), "out.pdf", &letter_document(4));

    let writer = PdfWriter::with_options(WriteOptions {
        atomic: false,
        ..Default::default()
    });
    writer.save(&letter_document(1), &output).await.unwrap();

    let reloaded = load_pdf(&output).await.unwrap();
    assert_eq!(page_labels(&reloaded), ["Page 1"]);
}

#[tokio::test]
async fn test_save_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("missing").join("out.pdf");

    let result = save_pdf(&letter_document(1), &output).await;
    assert!(matches!(
        result,
        Err(PdfPagesError::FailedToCreateOutput { .. })
    ));
}

#[tokio::test]
async fn test_reader_errors() {
    let temp_dir = TempDir::new().unwrap();
    let reader = PdfReader::new();

    let missing = reader.load(&temp_dir.path().join("missing.pdf")).await;
    assert!(matches!(missing, Err(PdfPagesError::FileNotFound { .. })));

    let directory = reader.load(temp_dir.path()).await;
    assert!(matches!(directory, Err(PdfPagesError::NotAFile { .. })));

    let garbage = temp_dir.path().join("garbage.pdf");
    std::fs::write(&garbage, b"this is not a pdf").unwrap();
    let err = reader.load(&garbage).await.unwrap_err();
    assert!(matches!(err, PdfPagesError::FailedToLoadPdf { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_load_all_keeps_order_and_counts_failures() {
    let temp_dir = TempDir::new().unwrap();
    let mut paths: Vec<_> = (1..=5)
        .map(|pages| {
            write_pdf(
                temp_dir.path(),
                &format!("doc{pages}.pdf"),
                &letter_document(pages),
            )
        })
        .collect();
    paths.insert(2, temp_dir.path().join("missing.pdf"));

    let (results, stats) = PdfReader::new().load_all(&paths, 4).await;

    assert_eq!(results.len(), 6);
    assert_eq!(stats.success_count, 5);
    assert_eq!(stats.failure_count, 1);
    assert_eq!(stats.total_pages, 15);
    assert!(results[2].is_err());

    let counts: Vec<usize> = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|loaded| loaded.page_count)
        .collect();
    assert_eq!(counts, [1, 2, 3, 4, 5]);
}
