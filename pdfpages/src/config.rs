//! Configuration module for pdfpages.
//!
//! This module holds the validated, normalized configuration that drives a
//! run of the command-line tool. It handles:
//! - Validation of argument combinations
//! - Resolution of conflicting options
//! - Application of defaults

use anyhow::{Result, bail};

use crate::PdfPagesError;
use crate::ops::Operation;
use std::{path::PathBuf, str::FromStr};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact structure.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Drop unreferenced objects, renumber and compress streams.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfPagesError;

    /// Parse compression level from `none`, `standard` or `maximum`.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfPagesError::InvalidConfig {
                message: format!(
                    "Invalid compression level: {s}. Must be one of: none, standard, maximum"
                ),
            }),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// What a run does with its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Apply one operation to every input independently.
    Apply(Operation),
    /// Concatenate all inputs into one document.
    Merge,
    /// Report on each input without writing anything.
    Inspect,
}

impl Task {
    /// Whether the task writes output files.
    pub fn writes_output(&self) -> bool {
        !matches!(self, Self::Inspect)
    }

    /// Whether the output path names a directory rather than a file.
    ///
    /// Extraction always writes a directory of pages; other operations do so
    /// only when several inputs are processed.
    pub fn outputs_directory(&self, input_count: usize) -> bool {
        match self {
            Self::Apply(operation) => operation.produces_pages() || input_count > 1,
            Self::Merge | Self::Inspect => false,
        }
    }
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// What to do.
    pub task: Task,

    /// Input PDF file paths, in order.
    pub inputs: Vec<PathBuf>,

    /// Output file or directory. Unused for [`Task::Inspect`].
    pub output: Option<PathBuf>,

    /// Dry run mode - process without writing output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Continue with the remaining inputs when one fails.
    pub continue_on_error: bool,

    /// Number of parallel jobs (None = auto-detect).
    pub jobs: Option<usize>,

    /// Emit machine-readable JSON instead of text.
    pub json: bool,
}

impl Config {
    /// Create a configuration with defaults for everything but the task,
    /// inputs and output.
    pub fn new(task: Task, inputs: Vec<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            task,
            inputs,
            output,
            dry_run: false,
            verbose: false,
            overwrite_mode: OverwriteMode::default(),
            quiet: false,
            compression: CompressionLevel::default(),
            continue_on_error: false,
            jobs: None,
            json: false,
        }
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - A task that writes has no output path, or the output is an input
    /// - Operation parameters are out of range
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if self.task.writes_output() {
            let Some(output) = &self.output else {
                bail!("An output path is required (use --output)");
            };

            if self.inputs.iter().any(|input| input == output) {
                bail!(
                    "Output path cannot be the same as an input file: {}",
                    output.display()
                );
            }
        }

        if let Task::Apply(Operation::InsertBlank { count: 0, .. }) = &self.task {
            bail!(PdfPagesError::invalid_insertion(
                "number of pages must be at least 1"
            ));
        }

        if let Task::Apply(Operation::Organize { steps, .. }) = &self.task
            && steps.is_empty()
        {
            bail!("Organize needs at least one --step");
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
