//! Error types for the I/O around the parser.
//!
//! The parser itself cannot fail. Everything here belongs to reading paragraph streams from
//! disk and writing rendered trees back out, and is always scoped to a single document.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a document on disk into a paragraph stream.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("Cannot read file '{path}': {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A directory could not be walked.
    #[error("Cannot scan '{path}': {source}")]
    Walk {
        /// Root being scanned.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },
    /// A JSON paragraph stream was malformed.
    #[error("Invalid paragraph stream in '{path}' (line {line}): {source}")]
    Json {
        /// File that failed.
        path: PathBuf,
        /// 1-based line of the offending record (1 for array input).
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A text-based document was not valid UTF-8.
    #[error("Cannot decode '{path}' as UTF-8: {source}")]
    Encoding {
        /// File that failed.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: std::str::Utf8Error,
    },
    /// A Word document's package or XML parts could not be read.
    #[error("Cannot read Word document '{path}': {details}")]
    Docx {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        details: String,
    },
    /// The markdown parser could not be set up or produced no tree.
    #[error("Cannot parse markdown '{path}': {details}")]
    Markdown {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        details: String,
    },
    /// No source format handles this file extension.
    #[error("Unsupported document format: '{path}'")]
    UnsupportedFormat {
        /// File that was rejected.
        path: PathBuf,
    },
}

/// Failure to render or persist a parsed specification.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The tree could not be serialised.
    #[error("Cannot render {spec}: {source}")]
    Render {
        /// Specification identifier.
        spec: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// The rendered output could not be written.
    #[error("Cannot write {spec} to '{path}': {source}")]
    Write {
        /// Specification identifier.
        spec: String,
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Another document of the same run already writes to this file, or the file is one of
    /// the run's inputs.
    #[error("Cannot write {spec} to '{path}': already claimed by '{claimed_by}'")]
    Collision {
        /// Specification identifier.
        spec: String,
        /// Destination file.
        path: PathBuf,
        /// Document (or input file) that owns the destination.
        claimed_by: PathBuf,
    },
}

/// Any per-document failure in a batch run.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Reading the paragraph stream failed; the parser never ran.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Rendering or writing the result failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// An unknown output format name.
#[derive(Debug, Error)]
#[error("Unknown output format '{0}' (expected xml, json or outline)")]
pub struct UnknownFormat(pub String);
