//! pdfpages - Edit the pages of PDF documents.
//!
//! Command-line front end for the `pdfpages` library.

mod cli;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, CommonArgs};
use pdfpages::batch::BatchProcessor;
use pdfpages::config::{Config, OverwriteMode, Task};
use pdfpages::error::PdfPagesError;
use pdfpages::inspect::{DocumentInfo, inspect};
use pdfpages::io::{PdfReader, PdfWriter};
use pdfpages::ops::{ExtractedPage, Operation, OperationOutput, merge_documents};
use pdfpages::output::{
    OutputFormatter, display_batch_summary, display_document_info, display_load_statistics,
    display_scrub_report,
};
use pdfpages::utils::collect_paths_for_patterns;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.common());

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Install the log subscriber. `RUST_LOG` directives are combined with the
/// level chosen by `--verbose` / `--quiet`.
fn init_tracing(common: &CommonArgs) {
    let log_level = if common.verbose {
        Level::DEBUG
    } else if common.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfPagesError> {
    let inputs = collect_paths_for_patterns(&cli.common().inputs)?;
    let config = cli.to_config(inputs)?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.is_verbose() && !config.json {
        formatter.section(&format!("{} v{}", pdfpages::NAME, pdfpages::VERSION));
        formatter.blank_line();
    }

    if config.dry_run {
        formatter.info("Dry run - no files will be written");
    }

    match &config.task {
        Task::Inspect => run_inspect(&config, &formatter).await,
        Task::Merge => run_merge(&config, &formatter).await,
        Task::Apply(operation) => run_apply(&config, operation, &formatter).await,
    }
}

/// Print a report for every input.
async fn run_inspect(config: &Config, formatter: &OutputFormatter) -> Result<(), PdfPagesError> {
    let reader = PdfReader::new();
    let (results, _) = reader.load_all(&config.inputs, config.effective_jobs()).await;

    let mut reports: Vec<DocumentInfo> = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(loaded) => reports.push(inspect(&loaded.document).with_path(&loaded.path)),
            Err(err) if config.continue_on_error => formatter.error(&err.to_string()),
            Err(err) => return Err(err),
        }
    }

    if config.json {
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| PdfPagesError::other(format!("Failed to encode report: {e}")))?;
        println!("{json}");
    } else {
        for report in &reports {
            display_document_info(formatter, report);
        }
    }

    Ok(())
}

/// Concatenate every input into one output document.
async fn run_merge(config: &Config, formatter: &OutputFormatter) -> Result<(), PdfPagesError> {
    let output = output_path(config)?;

    formatter.info(&format!("Loading {} file(s)...", config.inputs.len()));
    let reader = PdfReader::new();
    let (results, stats) = reader.load_all(&config.inputs, config.effective_jobs()).await;

    if formatter.is_verbose() {
        display_load_statistics(formatter, &stats);
    }

    let mut documents = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(loaded) => {
                formatter.debug(&format!(
                    "{}: {} page(s)",
                    loaded.path.display(),
                    loaded.page_count
                ));
                documents.push(loaded.document);
            }
            Err(err) if config.continue_on_error => {
                formatter.warning(&format!("Skipping: {err}"));
            }
            Err(err) => return Err(err),
        }
    }

    let merged = merge_documents(&documents)?;

    let writer = PdfWriter::with_compression(config.compression);
    write_document(config, formatter, &writer, &merged, output).await?;

    if !config.dry_run {
        formatter.success(&format!(
            "Merged {} file(s) into {}",
            documents.len(),
            output.display()
        ));
    }
    Ok(())
}

/// Apply one operation to every input and write the results.
async fn run_apply(
    config: &Config,
    operation: &Operation,
    formatter: &OutputFormatter,
) -> Result<(), PdfPagesError> {
    let output = output_path(config)?;
    let input_count = config.inputs.len();
    let directory = config.task.outputs_directory(input_count);

    if directory && !config.dry_run {
        tokio::fs::create_dir_all(output)
            .await
            .map_err(|source| PdfPagesError::FailedToCreateOutput {
                path: output.to_path_buf(),
                source,
            })?;
    }

    let jobs = config.effective_jobs();
    formatter.info(&format!(
        "{}: {input_count} file(s)",
        capitalize(&operation.to_string())
    ));
    formatter.debug(&format!("Using {jobs} worker(s)"));

    let mut finished = 0;
    let items = BatchProcessor::new(jobs)
        .run_with_progress(&config.inputs, operation, |item| {
            finished += 1;
            formatter.progress(finished, input_count, &item.path.display().to_string());
        })
        .await;

    let writer = PdfWriter::with_compression(config.compression);
    let mut succeeded = 0;
    let mut failed = 0;

    for item in items {
        let result = match item.outcome {
            Ok(result) => {
                formatter.debug(&format!(
                    "{}: {} page(s) in {:.2}s",
                    item.path.display(),
                    result.page_count(),
                    item.elapsed.as_secs_f64()
                ));
                write_output(config, formatter, &writer, &item.path, result, directory).await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => succeeded += 1,
            Err(err) if config.continue_on_error && !err.is_fatal() => {
                formatter.error(&format!("{}: {err}", item.path.display()));
                failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if input_count > 1 || failed > 0 {
        display_batch_summary(formatter, succeeded, failed);
    }

    if succeeded == 0 && failed > 0 {
        return Err(PdfPagesError::other("No input could be processed"));
    }

    if config.dry_run {
        formatter.success("Dry run completed successfully");
    }
    Ok(())
}

/// Write what an operation produced for `input`.
async fn write_output(
    config: &Config,
    formatter: &OutputFormatter,
    writer: &PdfWriter,
    input: &Path,
    result: OperationOutput,
    directory: bool,
) -> Result<(), PdfPagesError> {
    let output = output_path(config)?;

    match result {
        OperationOutput::Document(document) => {
            let target = document_target(output, input, directory);
            write_document(config, formatter, writer, &document, &target).await
        }
        OperationOutput::Scrubbed { document, report } => {
            display_scrub_report(formatter, &input.display().to_string(), &report);
            let target = document_target(output, input, directory);
            write_document(config, formatter, writer, &document, &target).await
        }
        OperationOutput::Pages(pages) => {
            let several_inputs = config.inputs.len() > 1;
            for page in &pages {
                let target = output.join(page_file_name(input, page, several_inputs));
                write_document(config, formatter, writer, &page.document, &target).await?;
            }
            Ok(())
        }
    }
}

/// Save one document, honoring dry run and the overwrite mode.
async fn write_document(
    config: &Config,
    formatter: &OutputFormatter,
    writer: &PdfWriter,
    document: &lopdf::Document,
    target: &Path,
) -> Result<(), PdfPagesError> {
    if config.dry_run {
        formatter.info(&format!("Would write {}", target.display()));
        return Ok(());
    }

    handle_output_overwrite(config, formatter, target).await?;

    let stats = writer.save(document, target).await?;
    formatter.success(&format!(
        "Wrote {} ({})",
        stats.output_path.display(),
        stats.format_file_size()
    ));
    formatter.detail("Write time", &format!("{:.2}s", stats.write_time.as_secs_f64()));
    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
    target: &Path,
) -> Result<(), PdfPagesError> {
    // Check if output exists
    if !target.exists() {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfPagesError::output_exists(target.to_path_buf())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(PdfPagesError::output_exists(target.to_path_buf()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                target.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfPagesError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfPagesError::Cancelled)
            }
        }
    }
}

fn output_path(config: &Config) -> Result<&Path, PdfPagesError> {
    config
        .output
        .as_deref()
        .ok_or_else(|| PdfPagesError::invalid_config("An output path is required (use --output)"))
}

/// Where a single-document result goes: the output itself, or a file named
/// after the input inside the output directory.
fn document_target(output: &Path, input: &Path, directory: bool) -> PathBuf {
    if !directory {
        return output.to_path_buf();
    }
    match input.file_name() {
        Some(name) => output.join(name),
        None => output.join("output.pdf"),
    }
}

/// `page-N.pdf`, prefixed with the input's stem when several inputs share
/// one output directory.
fn page_file_name(input: &Path, page: &ExtractedPage, several_inputs: bool) -> String {
    let name = page.file_name();
    match input.file_stem() {
        Some(stem) if several_inputs => format!("{}-{name}", stem.to_string_lossy()),
        _ => name,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
