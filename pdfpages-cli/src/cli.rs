//! CLI argument parsing for pdfpages.
//!
//! This module defines the command-line interface structure using `clap`.
//! Every subcommand shares the same input/output flags through
//! [`CommonArgs`]; [`Cli::to_config`] turns the parsed arguments into a
//! validated [`Config`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfpages::config::{CompressionLevel, Config, OverwriteMode, Task};
use pdfpages::error::{PdfPagesError, Result};
use pdfpages::ops::{Operation, OrganizeStep, Rotation, SplitMode, parse_insertion_parameters};
use pdfpages::pages::PageOrderMode;

/// Edit the pages of PDF documents.
///
/// pdfpages inserts, deletes, extracts, reorders, splits and rotates pages,
/// merges documents and removes identifying metadata. Inputs are never
/// modified; results are written to the path given with --output.
#[derive(Parser, Debug)]
#[command(name = "pdfpages")]
#[command(version)]
#[command(about = "Edit the pages of PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// What to do with the input files
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert blank pages
    ///
    /// Blank pages take the size of the first page.
    ///
    /// Examples:
    ///   pdfpages insert report.pdf --at 0 -o out.pdf
    ///   pdfpages insert report.pdf --at 4 --count 2 -o out.pdf
    Insert {
        /// Position of the first blank page (0 inserts before page 1)
        #[arg(long, value_name = "POSITION")]
        at: String,

        /// Number of blank pages to insert
        #[arg(long, value_name = "N", default_value = "1")]
        count: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Delete the pages in a range
    ///
    /// Examples:
    ///   pdfpages delete scan.pdf -p "1, 5-7" -o out.pdf
    Delete {
        /// Pages to delete (e.g., "1-3, 7")
        #[arg(short, long, value_name = "RANGE")]
        pages: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Extract pages into one file per page
    ///
    /// Writes page-N.pdf files into the output directory.
    ///
    /// Examples:
    ///   pdfpages extract book.pdf -p 10-12 -o pages/
    Extract {
        /// Pages to extract (e.g., "1-3, 7")
        #[arg(short, long, value_name = "RANGE")]
        pages: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Reverse page order
    Reverse {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Split every page into two halves
    ///
    /// Vertical cuts produce left and right halves; horizontal cuts produce
    /// top and bottom halves.
    Split {
        /// Direction of the cut
        #[arg(short, long, value_name = "MODE", default_value = "vertical")]
        #[arg(value_parser = ["vertical", "horizontal", "v", "h"])]
        mode: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Rotate pages clockwise
    Rotate {
        /// Degrees to rotate by
        #[arg(short, long, value_name = "DEGREES")]
        #[arg(value_parser = ["90", "180", "270"])]
        degrees: String,

        /// Pages to rotate (default: all)
        #[arg(short, long, value_name = "RANGE")]
        pages: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Move, duplicate and delete pages in one pass
    ///
    /// Steps run in order; positions are 1-based and refer to the order as
    /// it stands when the step runs.
    ///
    /// Examples:
    ///   pdfpages organize doc.pdf -s move=5:1 -s duplicate=1 -o out.pdf
    Organize {
        /// Edit to apply: move=FROM:TO, duplicate=N or delete=N
        #[arg(short, long = "step", value_name = "STEP", required = true)]
        steps: Vec<String>,

        /// Reject duplicate steps
        #[arg(long)]
        reorder_only: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Concatenate documents in the order given
    Merge {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Remove document metadata
    ///
    /// Clears the document information dictionary, XMP metadata, the
    /// document ID and page-piece data.
    Scrub {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show page count, page sizes and metadata
    Info {
        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Input PDF files (glob patterns are expanded)
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output file, or directory when several files are produced
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Dry run - load and process inputs without writing output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show per-file details and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Overwrite existing output without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Compression level for output PDFs
    ///
    /// - none: No compression (preserves exact structure)
    /// - standard: Compress streams (default)
    /// - maximum: Also drop unused objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Keep going when an input fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of files processed concurrently (default: CPU cores)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Flags shared by every subcommand.
    pub fn common(&self) -> &CommonArgs {
        match &self.command {
            Command::Insert { common, .. }
            | Command::Delete { common, .. }
            | Command::Extract { common, .. }
            | Command::Reverse { common }
            | Command::Split { common, .. }
            | Command::Rotate { common, .. }
            | Command::Organize { common, .. }
            | Command::Merge { common }
            | Command::Scrub { common }
            | Command::Info { common } => common,
        }
    }

    /// Build the task described by the subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if a subcommand parameter does not parse.
    pub fn task(&self) -> Result<Task> {
        let operation = match &self.command {
            Command::Insert { at, count, .. } => {
                let (position, count) = parse_insertion_parameters(at, count)?;
                Operation::InsertBlank { position, count }
            }
            Command::Delete { pages, .. } => Operation::Delete {
                range: pages.clone(),
            },
            Command::Extract { pages, .. } => Operation::Extract {
                range: pages.clone(),
            },
            Command::Reverse { .. } => Operation::Reverse,
            Command::Split { mode, .. } => Operation::Split {
                mode: SplitMode::from_str(mode)?,
            },
            Command::Rotate { degrees, pages, .. } => Operation::Rotate {
                rotation: Rotation::from_str(degrees)?,
                range: pages.clone(),
            },
            Command::Organize {
                steps,
                reorder_only,
                ..
            } => Operation::Organize {
                steps: steps
                    .iter()
                    .map(|step| OrganizeStep::from_str(step))
                    .collect::<Result<Vec<_>>>()?,
                mode: if *reorder_only {
                    PageOrderMode::ReorderOnly
                } else {
                    PageOrderMode::Organize
                },
            },
            Command::Scrub { .. } => Operation::Scrub,
            Command::Merge { .. } => return Ok(Task::Merge),
            Command::Info { .. } => return Ok(Task::Inspect),
        };
        Ok(Task::Apply(operation))
    }

    /// Convert CLI arguments into a validated Config.
    ///
    /// `inputs` are the already expanded input paths.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is invalid
    /// - A subcommand parameter is invalid
    /// - Configuration validation fails
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let common = self.common();

        let compression = CompressionLevel::from_str(&common.compression)?;

        let overwrite_mode = if common.force {
            OverwriteMode::Force
        } else if common.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let mut config = Config::new(self.task()?, inputs, common.output.clone());
        config.dry_run = common.dry_run;
        config.verbose = common.verbose;
        config.overwrite_mode = overwrite_mode;
        config.quiet = common.quiet;
        config.compression = compression;
        config.continue_on_error = common.continue_on_error;
        config.jobs = common.jobs;
        config.json = common.json;

        config.validate().map_err(|e| {
            PdfPagesError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
