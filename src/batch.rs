//! Running the parser over many documents.
//!
//! Documents share nothing, so they are processed in parallel and each one succeeds or fails
//! on its own: a document that cannot be read or written is reported and skipped while the
//! rest of the batch carries on.

use crate::catalog;
use crate::error::{DocumentError, OutputError};
use crate::input;
use crate::model::Summary;
use crate::record_context::{parse_document, ParseOutcome};
use crate::render::{render, OutputFormat, RenderOptions};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
/// How to name, render and place output for each document.
pub struct BatchOptions {
    /// Output rendering.
    pub format: OutputFormat,
    /// Renderer layout.
    pub render: RenderOptions,
    /// Prefix for document names derived from spec numbers.
    pub name_prefix: String,
    /// Directory for output files; next to each input when `None`.
    pub out_dir: Option<PathBuf>,
    /// Worker threads, 0 for rayon's default.
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            render: RenderOptions::default(),
            name_prefix: "3GPP TS".to_string(),
            out_dir: None,
            jobs: 0,
        }
    }
}

#[derive(Clone, Debug)]
/// One successfully processed document.
pub struct DocumentReport {
    /// Input file.
    pub input: PathBuf,
    /// Document name given to the tree root.
    pub spec: String,
    /// File the rendered tree was written to.
    pub output: PathBuf,
    /// Node counts of the parsed tree.
    pub summary: Summary,
    /// Number of diagnostics raised while parsing.
    pub diagnostics: usize,
}

#[derive(Debug, Default)]
/// Outcome of a batch run, in input order.
pub struct BatchReport {
    /// Documents written successfully.
    pub processed: Vec<DocumentReport>,
    /// Documents that failed, with the reason.
    pub failed: Vec<(PathBuf, DocumentError)>,
}

impl BatchReport {
    #[must_use]
    /// True when every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[must_use]
/// Where the rendered output for `input` goes.
///
/// The input's extension is replaced by the format's. An output that would land on the input
/// itself (JSON in, JSON out, same directory) gets a `.parsed` infix instead, which
/// [`input::find_documents`] skips on later runs.
pub fn output_path(input: &Path, format: OutputFormat, out_dir: Option<&Path>) -> PathBuf {
    let mut renamed = input.with_extension(format.extension());
    if let (Some(dir), Some(file_name)) = (out_dir, renamed.file_name()) {
        renamed = dir.join(file_name);
    }
    if renamed == input {
        renamed = input.with_extension(format!("{}.{}", input::RENDERED_MARKER, format.extension()));
    }
    renamed
}

/// Read and parse one document.
///
/// # Errors
///
/// Returns an error if the document cannot be read as a paragraph stream.
pub fn parse_file(path: &Path, name_prefix: &str) -> Result<ParseOutcome, DocumentError> {
    let paragraphs = input::read_paragraphs(path)?;
    let name = input::document_name(path, name_prefix);
    let outcome = parse_document(name, &paragraphs);

    let summary = outcome.specification.summary();
    let product = catalog::spec_number(&outcome.specification.name)
        .and_then(|number| catalog::product(&number))
        .unwrap_or("unknown product");
    tracing::info!(
        spec = %outcome.specification.name,
        product,
        sections = summary.sections,
        requirements = summary.requirements,
        test_cases = summary.test_cases,
        "parsed document"
    );
    for diagnostic in &outcome.diagnostics {
        tracing::debug!(spec = %outcome.specification.name, "{diagnostic}");
    }
    Ok(outcome)
}

/// Read, parse, render and write one document.
///
/// # Errors
///
/// Returns an error if reading, rendering or writing fails. Write failures carry the
/// document name.
pub fn process_document(path: &Path, options: &BatchOptions) -> Result<DocumentReport, DocumentError> {
    let outcome = parse_file(path, &options.name_prefix)?;
    let spec = outcome.specification.name.clone();

    let rendered = render(&outcome.specification, options.format, &options.render).map_err(
        |source| OutputError::Render {
            spec: spec.clone(),
            source,
        },
    )?;

    let output = output_path(path, options.format, options.out_dir.as_deref());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Write {
            spec: spec.clone(),
            path: output.clone(),
            source,
        })?;
    }
    fs::write(&output, rendered).map_err(|source| OutputError::Write {
        spec: spec.clone(),
        path: output.clone(),
        source,
    })?;
    tracing::info!(spec = %spec, output = %output.display(), "wrote output");

    Ok(DocumentReport {
        input: path.to_path_buf(),
        spec,
        output,
        summary: outcome.specification.summary(),
        diagnostics: outcome.diagnostics.len(),
    })
}

/// Pair each document with the output it would write, or with the earlier document that
/// already claims that output.
///
/// Outputs are claimed in input order. An output that is itself one of the inputs is never
/// written either.
fn plan_outputs<'a>(
    documents: &'a [PathBuf],
    options: &BatchOptions,
) -> Vec<(&'a Path, PathBuf, Option<PathBuf>)> {
    let inputs: HashSet<&Path> = documents.iter().map(PathBuf::as_path).collect();
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

    documents
        .iter()
        .map(|path| {
            let output = output_path(path, options.format, options.out_dir.as_deref());
            let clash = if inputs.contains(output.as_path()) {
                Some(output.clone())
            } else if let Some(owner) = claimed.get(&output) {
                Some(owner.to_path_buf())
            } else {
                claimed.insert(output.clone(), path);
                None
            };
            (path.as_path(), output, clash)
        })
        .collect()
}

/// Process every document independently and in parallel.
///
/// Documents whose output file would collide with an earlier document's output, or with an
/// input of the same run, fail with [`OutputError::Collision`] instead of overwriting it.
pub fn run_batch(documents: &[PathBuf], options: &BatchOptions) -> BatchReport {
    let plan = plan_outputs(documents, options);
    let work = || -> Vec<Result<DocumentReport, DocumentError>> {
        plan.par_iter()
            .map(|(path, output, clash)| match clash {
                Some(claimed_by) => Err(OutputError::Collision {
                    spec: input::document_name(path, &options.name_prefix),
                    path: output.clone(),
                    claimed_by: claimed_by.clone(),
                }
                .into()),
                None => process_document(path, options),
            })
            .collect()
    };

    let results = if options.jobs == 0 {
        work()
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.jobs)
            .build()
        {
            Ok(pool) => pool.install(work),
            Err(e) => {
                tracing::warn!("cannot build a {}-thread pool, using the default: {e}", options.jobs);
                work()
            }
        }
    };

    let mut report = BatchReport::default();
    for (path, result) in documents.iter().zip(results) {
        match result {
            Ok(done) => report.processed.push(done),
            Err(e) => {
                tracing::warn!(input = %path.display(), "skipping document: {e}");
                report.failed.push((path.clone(), e));
            }
        }
    }
    report
}

#[cfg(test)]
#[path = "tests/batch.rs"]
mod tests;
