//! Locating documents on disk and reading them into paragraph streams.

use crate::catalog;
use crate::error::InputError;
use crate::formats;
use crate::paragraph::Paragraph;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Infix given to rendered output that shares its extension with the input,
/// e.g. `33117-j20.parsed.json`.
pub const RENDERED_MARKER: &str = "parsed";

#[must_use]
/// True for files a previous run wrote next to its inputs.
pub fn is_rendered_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| Path::new(stem).extension())
        .is_some_and(|infix| infix == RENDERED_MARKER)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Expand files and directories into the list of documents to process.
///
/// Files named explicitly are always included. Directories are walked recursively and only
/// files with one of `extensions` are kept, minus output of earlier runs (see
/// [`is_rendered_output`]). The result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be walked.
pub fn find_documents(paths: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>, InputError> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry.map_err(|source| InputError::Walk {
                    path: path.clone(),
                    source,
                })?;
                if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
                    continue;
                }
                if is_rendered_output(entry.path()) {
                    tracing::debug!(path = %entry.path().display(), "skipping earlier output");
                    continue;
                }
                documents.push(entry.into_path());
            }
        } else if path.is_file() {
            documents.push(path.clone());
        } else {
            return Err(InputError::Read {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
    }

    documents.sort();
    documents.dedup();
    Ok(documents)
}

/// Read a document into its paragraph stream, choosing the format by extension.
///
/// # Errors
///
/// Returns an error if no format handles the extension, the file cannot be read, or its
/// content is invalid for the format.
pub fn read_paragraphs(path: &Path) -> Result<Vec<Paragraph>, InputError> {
    let Some(format) = formats::for_path(path) else {
        tracing::debug!(
            path = %path.display(),
            known = ?formats::known_extensions(),
            "no format for extension"
        );
        return Err(InputError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };
    let source = fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let paragraphs = format.paragraphs(&source, path)?;
    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        paragraphs = paragraphs.len(),
        "read paragraph stream"
    );
    Ok(paragraphs)
}

#[must_use]
/// Document name for a file, derived from its stem.
pub fn document_name(path: &Path, prefix: &str) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    catalog::document_name(&stem, prefix)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
