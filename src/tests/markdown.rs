use super::MarkdownFormat;
use crate::formats::SourceFormat;
use crate::paragraph::Paragraph;
use std::path::Path;

fn paragraphs(source: &str) -> Vec<Paragraph> {
    MarkdownFormat
        .paragraphs(source.as_bytes(), Path::new("33117.md"))
        .unwrap()
}

#[test]
fn test_atx_headings_become_heading_styles() {
    let source = "# 4 Requirements\n\n## 4.2 Logging ##\n\n### 4.2.1 Detail\n";

    assert_eq!(
        paragraphs(source),
        vec![
            Paragraph::heading(1, "4 Requirements"),
            Paragraph::heading(2, "4.2 Logging"),
            Paragraph::heading(3, "4.2.1 Detail"),
        ]
    );
}

#[test]
fn test_paragraph_lines_are_split() {
    let source = "## 4.2 Logging\n\nRequirement Name: Logging\nRequirement Reference: TS33.117-4.2\n\nRequirement Description: System shall log.\n";

    assert_eq!(
        paragraphs(source),
        vec![
            Paragraph::heading(2, "4.2 Logging"),
            Paragraph::body("Requirement Name: Logging"),
            Paragraph::body("Requirement Reference: TS33.117-4.2"),
            Paragraph::body("Requirement Description: System shall log."),
        ]
    );
}

#[test]
fn test_setext_heading_is_not_repeated_as_body() {
    let source = "Clause A\n========\n\nSub A\n-----\n\nbody text\n";

    assert_eq!(
        paragraphs(source),
        vec![
            Paragraph::heading(1, "Clause A"),
            Paragraph::heading(2, "Sub A"),
            Paragraph::body("body text"),
        ]
    );
}

#[test]
fn test_list_items_keep_their_text() {
    let source = "Execution Steps\n\n1. Log in\n2. Log out\n";

    let texts: Vec<String> = paragraphs(source).into_iter().map(|p| p.text).collect();

    assert_eq!(texts, ["Execution Steps", "Log in", "Log out"]);
}

#[test]
fn test_empty_document() {
    assert!(paragraphs("").is_empty());
}
