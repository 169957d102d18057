//! Applying one operation to many files.
//!
//! [`BatchProcessor`] loads each input, runs the operation on the blocking
//! pool and hands back one outcome per input. Files are independent, so up
//! to `workers` of them are processed at once. Nothing is written here; the
//! caller decides where outputs go.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::{PdfPagesError, Result};
use crate::io::PdfReader;
use crate::ops::{Operation, OperationOutput};

/// Result of running the operation on one input.
#[derive(Debug)]
pub struct BatchItem {
    /// Position of the input in the original list.
    pub index: usize,
    /// Input path.
    pub path: PathBuf,
    /// Operation output or the error that stopped it.
    pub outcome: Result<OperationOutput>,
    /// Time spent loading and processing this input.
    pub elapsed: Duration,
}

impl BatchItem {
    /// True when the operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Runs an [`Operation`] over many files with bounded concurrency.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    reader: PdfReader,
    workers: usize,
}

impl BatchProcessor {
    /// Create a processor running at most `workers` files at once.
    pub fn new(workers: usize) -> Self {
        Self {
            reader: PdfReader::new(),
            workers: workers.max(1),
        }
    }

    /// Use a custom reader.
    pub fn with_reader(mut self, reader: PdfReader) -> Self {
        self.reader = reader;
        self
    }

    /// Number of files processed concurrently.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `operation` to every path.
    ///
    /// Returns one item per path, in the order of `paths`, whether it
    /// succeeded or not.
    pub async fn run(&self, paths: &[PathBuf], operation: &Operation) -> Vec<BatchItem> {
        self.run_with_progress(paths, operation, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_item` as each input finishes.
    ///
    /// Completion order is not input order; the returned list is.
    pub async fn run_with_progress<F>(
        &self,
        paths: &[PathBuf],
        operation: &Operation,
        mut on_item: F,
    ) -> Vec<BatchItem>
    where
        F: FnMut(&BatchItem),
    {
        debug!(files = paths.len(), workers = self.workers, %operation, "starting batch");

        let tasks = paths.iter().cloned().enumerate().map(|(index, path)| {
            let reader = self.reader;
            let operation = operation.clone();
            async move {
                let start = Instant::now();
                let outcome = process_one(reader, &path, operation).await;
                BatchItem {
                    index,
                    path,
                    outcome,
                    elapsed: start.elapsed(),
                }
            }
        });

        let mut items: Vec<BatchItem> = stream::iter(tasks)
            .buffer_unordered(self.workers)
            .inspect(|item| {
                if let Err(err) = &item.outcome {
                    warn!(path = %item.path.display(), error = %err, "batch item failed");
                }
                on_item(item);
            })
            .collect()
            .await;

        items.sort_by_key(|item| item.index);
        items
    }
}

async fn process_one(
    reader: PdfReader,
    path: &Path,
    operation: Operation,
) -> Result<OperationOutput> {
    let loaded = reader.load(path).await?;
    tokio::task::spawn_blocking(move || operation.apply(loaded.document))
        .await
        .map_err(|e| PdfPagesError::other(format!("{} task failed: {e}", path.display())))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageGeometry;
    use crate::testing::letter_document;
    use tempfile::TempDir;

    fn write_pdf(dir: &TempDir, name: &str, pages: usize) -> PathBuf {
        let path = dir.path().join(name);
        let mut doc = letter_document(pages);
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (1..=6)
            .map(|pages| write_pdf(&temp_dir, &format!("doc{pages}.pdf"), pages))
            .collect();

        let items = BatchProcessor::new(3).run(&paths, &Operation::Reverse).await;

        assert_eq!(items.len(), 6);
        for (position, item) in items.iter().enumerate() {
            assert_eq!(item.index, position);
            assert_eq!(item.path, paths[position]);
            let Ok(OperationOutput::Document(doc)) = &item.outcome else {
                panic!("expected a document for {}", item.path.display());
            };
            assert_eq!(doc.page_count(), position + 1);
        }
    }

    #[tokio::test]
    async fn test_batch_reports_failures_per_item() {
        let temp_dir = TempDir::new().unwrap();
        let good = write_pdf(&temp_dir, "good.pdf", 3);
        let small = write_pdf(&temp_dir, "small.pdf", 1);
        let missing = temp_dir.path().join("missing.pdf");

        let operation = Operation::Delete {
            range: "1".to_string(),
        };
        let items = BatchProcessor::new(2)
            .run(&[good, missing, small], &operation)
            .await;

        assert!(items[0].is_ok());
        assert!(matches!(
            items[1].outcome,
            Err(PdfPagesError::FileNotFound { .. })
        ));
        assert!(matches!(
            items[2].outcome,
            Err(PdfPagesError::CannotDeleteAllPages { page_count: 1 })
        ));
    }

    #[tokio::test]
    async fn test_batch_progress_callback() {
        let temp_dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| write_pdf(&temp_dir, &format!("doc{i}.pdf"), 2))
            .collect();

        let mut seen = 0;
        BatchProcessor::new(2)
            .run_with_progress(&paths, &Operation::Scrub, |_| seen += 1)
            .await;
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_workers_at_least_one() {
        assert_eq!(BatchProcessor::new(0).workers(), 1);
    }
}
