//! scasparse: 3GPP SCAS requirement and test case extractor.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use scasparse::batch::{self, BatchOptions};
use scasparse::{catalog, config, input, render, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scasparse")]
#[command(about = "Extract requirements and test cases from 3GPP SCAS documents", long_about = None)]
struct Args {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one document and print the tree
    Parse {
        /// Word document (.docx), paragraph stream (.json, .ndjson, .jsonl) or markdown file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Output format: xml, json or outline
        #[arg(long, short = 'f')]
        format: Option<OutputFormat>,

        /// Document name, instead of deriving it from the file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Parse every matching document under the given paths
    Batch {
        /// Files or directories to process
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Directory for output files (default: next to each input)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output format: xml, json or outline
        #[arg(long, short = 'f')]
        format: Option<OutputFormat>,

        /// Worker threads (0 for one per core)
        #[arg(long, short = 'j')]
        jobs: Option<usize>,

        /// File extensions to match
        #[arg(long, short = 'e', value_name = "EXT")]
        ext: Vec<String>,
    },
    /// List the known SCAS specifications
    Catalog,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    let cfg = config::Config::load();

    let configured_format = match cfg.output_format() {
        Ok(format) => format,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Parse {
            file,
            output,
            format,
            name,
        } => run_parse(
            &cfg,
            &file,
            output.as_deref(),
            format.unwrap_or(configured_format),
            name,
        ),
        Command::Batch {
            paths,
            out_dir,
            format,
            jobs,
            ext,
        } => {
            // Override config with command line args
            let extensions = if ext.is_empty() {
                cfg.file_extensions.clone()
            } else {
                ext
            };
            let options = BatchOptions {
                format: format.unwrap_or(configured_format),
                render: cfg.render_options(),
                name_prefix: cfg.name_prefix.clone(),
                out_dir,
                jobs: jobs.unwrap_or(cfg.jobs),
            };
            run_batch(&paths, &extensions, &options)
        }
        Command::Catalog => {
            for (number, product) in catalog::SPECS {
                println!("{number}\t{product}");
            }
            ExitCode::SUCCESS
        }
    }
}

fn run_parse(
    cfg: &config::Config,
    file: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    name: Option<String>,
) -> ExitCode {
    let mut outcome = match batch::parse_file(file, &cfg.name_prefix) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(name) = name {
        outcome.specification.name = name;
    }
    for diagnostic in &outcome.diagnostics {
        tracing::warn!("{diagnostic}");
    }

    let rendered = match render(&outcome.specification, format, &cfg.render_options()) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::error!("Cannot render {}: {e}", outcome.specification.name);
            return ExitCode::FAILURE;
        }
    };
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                tracing::error!("Cannot write '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => print!("{rendered}"),
    }
    ExitCode::SUCCESS
}

fn run_batch(paths: &[PathBuf], extensions: &[String], options: &BatchOptions) -> ExitCode {
    let documents = match input::find_documents(paths, extensions) {
        Ok(documents) => documents,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if documents.is_empty() {
        tracing::warn!("No matching files found");
        return ExitCode::SUCCESS;
    }

    let report = batch::run_batch(&documents, options);
    tracing::info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
