//! PDF serialization and saving.
//!
//! Documents are serialized on the blocking pool. Saves are atomic by
//! default: the file is written next to its destination and renamed into
//! place, so an interrupted save never leaves a truncated PDF behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpages::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(&doc, Path::new("output.pdf")).await?;
//! println!("wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use lopdf::Document;
use tokio::task;
use tracing::debug;

use crate::config::CompressionLevel;
use crate::error::{PdfPagesError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Write to a temporary file, then rename over the destination.
    pub atomic: bool,

    /// How much effort to spend shrinking the output.
    pub compression: CompressionLevel,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::default(),
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Compression applied before writing.
    pub compression: CompressionLevel,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create an atomic writer with the given compression.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            options: WriteOptions {
                compression,
                ..Default::default()
            },
        }
    }

    /// The options this writer uses.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// Serialize a document to bytes.
    ///
    /// The document is not modified; compression is applied to a copy.
    pub fn to_bytes(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut doc = doc.clone();
        prepare(&mut doc, self.options.compression);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| PdfPagesError::FailedToWrite {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other(e),
            })?;
        Ok(bytes)
    }

    /// Save a document to `path`, returning statistics about the write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output (or temporary) file cannot be created
    /// - Writing or renaming fails
    pub async fn save(&self, doc: &Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let mut doc = doc.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();
            prepare(&mut doc, options.compression);

            let write_path = if options.atomic {
                temp_path_for(&path_buf)
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|source| {
                PdfPagesError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source,
                }
            })?;
            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            let written = doc
                .save_to(&mut writer)
                .map_err(std::io::Error::other)
                .and_then(|_| writer.flush())
                .map_err(|source| PdfPagesError::FailedToWrite {
                    path: write_path.clone(),
                    source,
                });
            if let Err(err) = written {
                if options.atomic {
                    let _ = std::fs::remove_file(&write_path);
                }
                return Err(err);
            }

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|source| {
                    PdfPagesError::FailedToWrite {
                        path: path_buf.clone(),
                        source,
                    }
                })?;
            }

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfPagesError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
                compression: options.compression,
            })
        })
        .await
        .map_err(|e| PdfPagesError::other(format!("Write task failed: {e}")))??;

        debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            "saved document"
        );
        Ok(stats)
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Remove an output file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub async fn remove_if_exists(&self, path: &Path) -> Result<()> {
        if self.exists(path).await {
            tokio::fs::remove_file(path)
                .await
                .map_err(|source| PdfPagesError::FailedToWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Apply a compression level to a document before it is serialized.
fn prepare(doc: &mut Document, compression: CompressionLevel) {
    match compression {
        CompressionLevel::None => {}
        CompressionLevel::Standard => {
            doc.compress();
        }
        CompressionLevel::Maximum => {
            doc.prune_objects();
            doc.renumber_objects();
            doc.compress();
        }
    }
}

/// Hidden sibling of `path` used for atomic writes.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
