use super::{document_name, find_documents, is_rendered_output, read_paragraphs};
use crate::error::InputError;
use crate::paragraph::Paragraph;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn extensions() -> Vec<String> {
    vec!["json".to_string(), "md".to_string()]
}

#[test]
fn test_directories_are_filtered_by_extension() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("TS 33.117 - General Requirements");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("33117-j20.json"), "[]").unwrap();
    fs::write(dir.path().join("33512-j10.MD"), "").unwrap();
    fs::write(dir.path().join("readme.txt"), "").unwrap();

    let found = find_documents(&[dir.path().to_path_buf()], &extensions()).unwrap();

    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"33117-j20.json".to_string()));
    assert!(names.contains(&"33512-j10.MD".to_string()));
}

#[test]
fn test_explicit_files_are_kept_and_deduplicated() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "").unwrap();

    let found = find_documents(&[file.clone(), file.clone()], &extensions()).unwrap();

    assert_eq!(found, vec![file]);
}

#[test]
fn test_missing_path_is_an_error() {
    let err = find_documents(&[PathBuf::from("/nonexistent/33117.json")], &extensions()).unwrap_err();
    assert!(matches!(err, InputError::Read { .. }));
}

#[test]
fn test_read_paragraphs_dispatches_on_extension() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("33117-j20.json");
    fs::write(&json, r#"[{"text":"Clause A","style":"Heading 1"}]"#).unwrap();
    let md = dir.path().join("33117-j20.md");
    fs::write(&md, "# Clause A\n").unwrap();

    assert_eq!(
        read_paragraphs(&json).unwrap(),
        vec![Paragraph::heading(1, "Clause A")]
    );
    assert_eq!(
        read_paragraphs(&md).unwrap(),
        vec![Paragraph::heading(1, "Clause A")]
    );
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("33117-j20.doc");
    fs::write(&doc, "binary").unwrap();

    let err = read_paragraphs(&doc).unwrap_err();

    assert!(matches!(err, InputError::UnsupportedFormat { .. }));
}

#[test]
fn test_document_name_from_path() {
    assert_eq!(
        document_name(Path::new("/specs/33117-j20.json"), "3GPP TS"),
        "3GPP TS 33.117"
    );
    assert_eq!(document_name(Path::new("draft.md"), "3GPP TS"), "draft");
}

#[test]
fn test_earlier_output_is_not_rediscovered() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("33117-j20.json"), "[]").unwrap();
    fs::write(dir.path().join("33117-j20.parsed.json"), "{}").unwrap();

    let found = find_documents(&[dir.path().to_path_buf()], &extensions()).unwrap();

    assert_eq!(found, vec![dir.path().join("33117-j20.json")]);
    assert!(is_rendered_output(Path::new("out/33117-j20.parsed.json")));
    assert!(!is_rendered_output(Path::new("33117-j20.json")));
    assert!(!is_rendered_output(Path::new("parsed.json")));
}
