//! PDF loading.
//!
//! Files are read with tokio and parsed on the blocking pool, so loading many
//! documents does not stall the async runtime. Encrypted input is reported
//! distinctly from malformed input.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.load_all(&paths, 4).await;
//! println!("loaded {} of {} files", stats.success_count, results.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use lopdf::Document;
use tracing::debug;

use crate::error::{PdfPagesError, Result};
use crate::pages::PageGeometry;
use crate::utils::format_file_size;

/// Placeholder path used in errors for documents loaded from memory.
const MEMORY_PATH: &str = "<memory>";

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// Statistics for a batch load operation.
#[derive(Debug, Clone)]
pub struct LoadStatistics {
    /// Number of PDFs successfully loaded.
    pub success_count: usize,

    /// Number of PDFs that failed to load.
    pub failure_count: usize,

    /// Total time taken for all loads.
    pub total_time: Duration,

    /// Total size of successfully loaded files.
    pub total_size: u64,

    /// Total number of pages loaded.
    pub total_pages: usize,
}

impl LoadStatistics {
    fn from_results(results: &[LoadResult], total_time: Duration) -> Self {
        let loaded: Vec<&LoadedPdf> = results.iter().filter_map(|r| r.as_ref().ok()).collect();

        Self {
            success_count: loaded.len(),
            failure_count: results.len() - loaded.len(),
            total_time,
            total_size: loaded.iter().map(|l| l.file_size).sum(),
            total_pages: loaded.iter().map(|l| l.page_count).sum(),
        }
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader {
    /// Reject documents that load but have no pages.
    verify: bool,
}

impl PdfReader {
    /// Create a reader that rejects page-less documents.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts any document that parses.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Parse a document from bytes.
    ///
    /// # Errors
    ///
    /// - [`PdfPagesError::EncryptedPdf`] when the document is encrypted
    /// - [`PdfPagesError::FailedToLoadPdf`] when the bytes are not a PDF
    /// - [`PdfPagesError::CorruptedPdf`] when verifying and there are no pages
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Document> {
        self.parse(bytes, Path::new(MEMORY_PATH))
    }

    fn parse(&self, bytes: &[u8], path: &Path) -> Result<Document> {
        let doc = Document::load_mem(bytes).map_err(|e| {
            let message = e.to_string();
            let lower = message.to_lowercase();
            if ["encrypt", "password", "decrypt"]
                .iter()
                .any(|needle| lower.contains(needle))
            {
                PdfPagesError::encrypted_pdf(path.to_path_buf())
            } else {
                PdfPagesError::failed_to_load_pdf(path.to_path_buf(), message)
            }
        })?;

        if doc.trailer.has(b"Encrypt") {
            return Err(PdfPagesError::encrypted_pdf(path.to_path_buf()));
        }

        if self.verify && doc.page_count() == 0 {
            return Err(PdfPagesError::corrupted_pdf(
                path.to_path_buf(),
                "PDF has no pages",
            ));
        }

        Ok(doc)
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist or is not a file
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages (when verifying)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfpages::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let start = Instant::now();
        check_path(path).await?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PdfPagesError::FileNotAccessible {
                path: path.to_path_buf(),
                source,
            })?;
        let file_size = bytes.len() as u64;

        let reader = *self;
        let path_buf = path.to_path_buf();
        let document = tokio::task::spawn_blocking(move || reader.parse(&bytes, &path_buf))
            .await
            .map_err(|e| PdfPagesError::other(format!("load task failed: {e}")))??;

        let page_count = document.page_count();
        let load_time = start.elapsed();
        debug!(path = %path.display(), page_count, ?load_time, "loaded document");

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            load_time,
            file_size,
        })
    }

    /// Load multiple PDF documents one at a time, in order.
    pub async fn load_sequential(&self, paths: &[PathBuf]) -> Vec<LoadResult> {
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            results.push(self.load(path).await);
        }

        results
    }

    /// Load multiple PDF documents concurrently.
    ///
    /// At most `workers` files are in flight at once. Results are returned
    /// in the same order as `paths`.
    pub async fn load_parallel(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        let reader = *self;
        let tasks = paths.iter().cloned().enumerate().map(|(idx, path)| async move {
            (idx, reader.load(&path).await)
        });

        let mut indexed: Vec<(usize, LoadResult)> = stream::iter(tasks)
            .buffer_unordered(workers.max(1))
            .collect()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Load all PDFs, in parallel when there are enough of them to pay off.
    ///
    /// Returns per-file results in input order plus aggregate statistics.
    pub async fn load_all(
        &self,
        paths: &[PathBuf],
        max_workers: usize,
    ) -> (Vec<LoadResult>, LoadStatistics) {
        let start = Instant::now();

        let results = if paths.len() <= 3 {
            self.load_sequential(paths).await
        } else {
            self.load_parallel(paths, max_workers).await
        };

        let stats = LoadStatistics::from_results(&results, start.elapsed());
        (results, stats)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `path` exists and is a regular file.
pub async fn check_path(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(PdfPagesError::not_a_file(path.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(PdfPagesError::file_not_found(path.to_path_buf()))
        }
        Err(source) => Err(PdfPagesError::FileNotAccessible {
            path: path.to_path_buf(),
            source,
        }),
    }
}
