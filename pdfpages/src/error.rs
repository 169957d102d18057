//! Error types for pdfpages.
//!
//! Every failure a page operation can report is a variant of
//! [`PdfPagesError`]. Errors are meant to be shown to a person, so each
//! message says what was wrong with the input and, where it helps, what to
//! do about it.
//!
//! # Error Categories
//!
//! - **Selection Errors**: empty or unusable page ranges
//! - **Parameter Errors**: out-of-bounds indices, bad insertion parameters
//! - **Invariant Errors**: operations that would leave zero pages
//! - **Load Errors**: malformed, corrupted or encrypted input
//! - **I/O Errors**: file access and write failures

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfpages operations.
pub type Result<T> = std::result::Result<T, PdfPagesError>;

/// Main error type for pdfpages operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfPagesError {
    /// The page range string was empty.
    #[error("Page range is empty\n  Hint: enter pages like \"1, 3-5\"")]
    EmptyInput,

    /// The page range string contained no page inside the document.
    #[error(
        "Page range '{range}' selects no valid pages\n  \
         Document has {total_pages} page(s). Page numbers must be between 1 and {total_pages}"
    )]
    NoValidPages {
        /// The range as entered.
        range: String,
        /// Total pages in the document.
        total_pages: usize,
    },

    /// An operation was given an empty page selection.
    #[error("No pages selected")]
    NoPagesSelected,

    /// A page index does not exist in the source document.
    #[error("Page index {index} is out of bounds for a document with {page_count} page(s)")]
    InvalidPageIndex {
        /// Zero-based index that was requested.
        index: usize,
        /// Page count of the source document.
        page_count: usize,
    },

    /// A rebuild was requested with no pages.
    #[error("Page order is empty; a document needs at least one page")]
    EmptyPageOrder,

    /// Blank page insertion parameters are out of range or malformed.
    #[error("Invalid insertion parameters: {reason}")]
    InvalidInsertionParameters {
        /// What was wrong with the parameters.
        reason: String,
    },

    /// Deleting the selection would leave the document without pages.
    #[error(
        "Cannot delete all {page_count} page(s); a document must keep at least one page"
    )]
    CannotDeleteAllPages {
        /// Page count of the source document.
        page_count: usize,
    },

    /// The page organizer holds a single page, which cannot be removed.
    #[error("Cannot delete the last remaining page")]
    CannotDeleteLastPage,

    /// Duplication was requested on a reorder-only page organizer.
    #[error("Page duplication is not available in reorder-only mode")]
    DuplicationDisabled,

    /// The document has no usable catalog or page tree.
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// Details about the structural problem.
        reason: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Input file is not accessible.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to load PDF data.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file (`<memory>` for byte input).
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF loaded but its structure is unusable.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF is encrypted and must be decrypted first.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// No documents were given to merge.
    #[error("No input documents specified for merging")]
    NoFilesToMerge,

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  \
         Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfPagesError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl From<anyhow::Error> for PdfPagesError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfPagesError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidInsertionParameters error.
    pub fn invalid_insertion(reason: impl Into<String>) -> Self {
        Self::InvalidInsertionParameters {
            reason: reason.into(),
        }
    }

    /// Create an InvalidDocument error.
    pub fn invalid_document(reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if the caller can recover by re-prompting or fixing the input.
    ///
    /// Returns true for selection, parameter and invariant errors, and for
    /// load errors that a different input (or a decrypt step) would fix.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::NoValidPages { .. }
                | Self::NoPagesSelected
                | Self::InvalidPageIndex { .. }
                | Self::EmptyPageOrder
                | Self::InvalidInsertionParameters { .. }
                | Self::CannotDeleteAllPages { .. }
                | Self::CannotDeleteLastPage
                | Self::DuplicationDisabled
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
        )
    }

    /// Check if this error should stop all processing immediately.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NoFilesToMerge
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
                | Self::Cancelled
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyInput
            | Self::NoValidPages { .. }
            | Self::NoPagesSelected
            | Self::InvalidPageIndex { .. }
            | Self::EmptyPageOrder
            | Self::InvalidInsertionParameters { .. }
            | Self::CannotDeleteAllPages { .. }
            | Self::CannotDeleteLastPage
            | Self::DuplicationDisabled => 1,
            Self::FileNotFound { .. } | Self::NotAFile { .. } | Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. }
            | Self::CorruptedPdf { .. }
            | Self::EncryptedPdf { .. }
            | Self::InvalidDocument { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
