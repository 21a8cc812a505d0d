use super::{output_path, parse_file, process_document, run_batch, BatchOptions};
use crate::input::find_documents;
use crate::error::{DocumentError, InputError, OutputError};
use crate::render::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STREAM: &str = r#"[
    {"text": "4 Requirements", "style": "Heading 1"},
    {"text": "4.2.3 Logging", "style": "Heading 2"},
    {"text": "Requirement Name: Logging", "style": "Normal"},
    {"text": "Requirement Description: System shall log.", "style": "Normal"},
    {"text": "more detail", "style": "Normal"},
    {"text": "Test Name: TC_LOG", "style": "Normal"},
    {"text": "Execution Steps", "style": "Normal"},
    {"text": "1. Trigger an event", "style": "B1"}
]"#;

#[test]
fn test_output_path() {
    assert_eq!(
        output_path(Path::new("/in/33117-j20.json"), OutputFormat::Xml, None),
        PathBuf::from("/in/33117-j20.xml")
    );
    assert_eq!(
        output_path(
            Path::new("/in/33117-j20.md"),
            OutputFormat::Json,
            Some(Path::new("/out"))
        ),
        PathBuf::from("/out/33117-j20.json")
    );
    assert_eq!(
        output_path(Path::new("/in/33117-j20.json"), OutputFormat::Json, None),
        PathBuf::from("/in/33117-j20.parsed.json")
    );
}

#[test]
fn test_parse_file_names_the_document() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("33117-j20.json");
    fs::write(&input, STREAM).unwrap();

    let outcome = parse_file(&input, "3GPP TS").unwrap();

    assert_eq!(outcome.specification.name, "3GPP TS 33.117");
    let summary = outcome.specification.summary();
    assert_eq!(summary.sections, 2);
    assert_eq!(summary.requirements, 1);
    assert_eq!(summary.test_cases, 1);
}

#[test]
fn test_process_document_writes_xml() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("33117-j20.json");
    fs::write(&input, STREAM).unwrap();
    let out_dir = dir.path().join("out");

    let options = BatchOptions {
        out_dir: Some(out_dir.clone()),
        ..BatchOptions::default()
    };
    let report = process_document(&input, &options).unwrap();

    assert_eq!(report.output, out_dir.join("33117-j20.xml"));
    let xml = fs::read_to_string(&report.output).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" ?>\n<Specification name=\"3GPP TS 33.117\">"));
    assert!(xml.contains("<Description>System shall log.\nmore detail</Description>"));
    assert!(xml.contains("<ExecutionSteps>1. Trigger an event</ExecutionSteps>"));
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("33117-j20.json");
    fs::write(&good, STREAM).unwrap();
    let broken = dir.path().join("33512-j10.json");
    fs::write(&broken, "[{not json").unwrap();
    let unsupported = dir.path().join("33513-j10.doc");
    fs::write(&unsupported, "legacy").unwrap();
    let also_good = dir.path().join("33514-j10.md");
    fs::write(&also_good, "# 4 Requirements\n\nTest Name: TC_UDM\n").unwrap();

    let documents = vec![good, broken.clone(), unsupported.clone(), also_good];
    let report = run_batch(&documents, &BatchOptions::default());

    assert!(!report.is_success());
    assert_eq!(report.processed.len(), 2);
    assert_eq!(report.processed[0].spec, "3GPP TS 33.117");
    assert_eq!(report.processed[1].spec, "3GPP TS 33.514");
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, broken);
    assert!(matches!(
        report.failed[0].1,
        DocumentError::Input(InputError::Json { .. })
    ));
    assert_eq!(report.failed[1].0, unsupported);
    assert!(dir.path().join("33514-j10.xml").exists());
}

#[test]
fn test_write_failure_carries_spec_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("33117-j20.json");
    fs::write(&input, STREAM).unwrap();
    // A file where the output directory should be makes the write fail.
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "").unwrap();

    let options = BatchOptions {
        out_dir: Some(blocker.join("nested")),
        ..BatchOptions::default()
    };
    let err = process_document(&input, &options).unwrap_err();

    match err {
        DocumentError::Output(OutputError::Write { spec, .. }) => {
            assert_eq!(spec, "3GPP TS 33.117");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_fixed_thread_count() {
    let dir = TempDir::new().unwrap();
    let documents: Vec<PathBuf> = (0..4)
        .map(|i| {
            let path = dir.path().join(format!("3351{i}-j10.json"));
            fs::write(&path, STREAM).unwrap();
            path
        })
        .collect();

    let options = BatchOptions {
        format: OutputFormat::Json,
        jobs: 2,
        ..BatchOptions::default()
    };
    let report = run_batch(&documents, &options);

    assert!(report.is_success());
    assert!(dir.path().join("33510-j10.parsed.json").exists());
    let specs: Vec<&str> = report.processed.iter().map(|r| r.spec.as_str()).collect();
    assert_eq!(
        specs,
        ["3GPP TS 33.510", "3GPP TS 33.511", "3GPP TS 33.512", "3GPP TS 33.513"]
    );
}

#[test]
fn test_same_stem_inputs_do_not_overwrite_each_other() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("33117.json");
    fs::write(&json, STREAM).unwrap();
    let md = dir.path().join("33117.md");
    fs::write(&md, "# 4 Requirements\n\nTest Name: TC_FROM_MARKDOWN\n").unwrap();

    let report = run_batch(&[json.clone(), md.clone()], &BatchOptions::default());

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].input, json);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, md);
    match &report.failed[0].1 {
        DocumentError::Output(OutputError::Collision {
            spec,
            path,
            claimed_by,
        }) => {
            assert_eq!(spec, "3GPP TS 33.117");
            assert_eq!(path, &dir.path().join("33117.xml"));
            assert_eq!(claimed_by, &json);
        }
        other => panic!("unexpected error {other}"),
    }
    let xml = fs::read_to_string(dir.path().join("33117.xml")).unwrap();
    assert!(xml.contains("<Name>TC_LOG</Name>"));
    assert!(!xml.contains("TC_FROM_MARKDOWN"));
}

#[test]
fn test_same_name_in_different_directories_with_out_dir() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("rel-18").join("33117-j20.json");
    let second = dir.path().join("rel-19").join("33117-j20.json");
    for path in [&first, &second] {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, STREAM).unwrap();
    }

    let options = BatchOptions {
        out_dir: Some(dir.path().join("out")),
        ..BatchOptions::default()
    };
    let report = run_batch(&[first.clone(), second.clone()], &options);

    assert_eq!(report.processed.len(), 1);
    assert_eq!(report.processed[0].input, first);
    assert_eq!(report.failed[0].0, second);
    assert!(matches!(
        report.failed[0].1,
        DocumentError::Output(OutputError::Collision { .. })
    ));
}

#[test]
fn test_output_never_replaces_another_input() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("33117.json");
    fs::write(&json, STREAM).unwrap();
    let md = dir.path().join("33117.md");
    fs::write(&md, "# 4 Requirements\n").unwrap();

    let options = BatchOptions {
        format: OutputFormat::Json,
        ..BatchOptions::default()
    };
    let report = run_batch(&[json.clone(), md.clone()], &options);

    assert_eq!(report.processed[0].output, dir.path().join("33117.parsed.json"));
    assert_eq!(report.failed[0].0, md);
    assert_eq!(fs::read_to_string(&json).unwrap(), STREAM);
}

#[test]
fn test_rerunning_a_json_batch_ignores_its_own_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("33117-j20.json"), STREAM).unwrap();
    let options = BatchOptions {
        format: OutputFormat::Json,
        ..BatchOptions::default()
    };
    let extensions = vec!["json".to_string()];

    for _ in 0..2 {
        let documents = find_documents(&[dir.path().to_path_buf()], &extensions).unwrap();
        assert_eq!(documents, vec![dir.path().join("33117-j20.json")]);
        let report = run_batch(&documents, &options);
        assert!(report.is_success());
    }
    assert!(dir.path().join("33117-j20.parsed.json").exists());
}
