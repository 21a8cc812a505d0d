use super::{FieldGrammar, FieldKind, FieldMatch};
use crate::model::RecordKind;

fn classify(text: &str) -> Option<FieldMatch> {
    FieldGrammar::shared().classify(text)
}

#[test]
fn test_every_label_is_recognised() {
    let cases = [
        ("Requirement Name: Logging", FieldKind::RequirementName),
        ("Requirement Reference: TS33.117-4.2.3", FieldKind::RequirementReference),
        ("Requirement Description: System shall log.", FieldKind::RequirementDescription),
        ("Threat References: TR 33.926, A.2.2", FieldKind::ThreatReferences),
        ("Test Name: TC_LOGGING", FieldKind::TestName),
        ("Purpose: Verify logging", FieldKind::Purpose),
        ("Pre-Conditions: Tester has access", FieldKind::PreConditions),
        ("Execution Steps", FieldKind::ExecutionStepsHeader),
        ("Expected Results: Events logged", FieldKind::ExpectedResults),
        ("Expected Format of Evidence: Screenshots", FieldKind::EvidenceFormat),
    ];

    for (text, kind) in cases {
        let found = classify(text).unwrap_or_else(|| panic!("no match for {text:?}"));
        assert_eq!(found.kind, kind, "wrong kind for {text:?}");
    }
}

#[test]
fn test_inline_value_is_trimmed() {
    let found = classify("Requirement Name:    Logging  ").unwrap();
    assert_eq!(found.inline.as_deref(), Some("Logging"));
}

#[test]
fn test_matching_is_case_insensitive() {
    let found = classify("EXPECTED FORMAT OF EVIDENCE: logs").unwrap();
    assert_eq!(found.kind, FieldKind::EvidenceFormat);
    assert_eq!(found.inline.as_deref(), Some("logs"));

    let found = classify("requirement name: x").unwrap();
    assert_eq!(found.kind, FieldKind::RequirementName);
}

#[test]
fn test_valued_labels_need_a_colon() {
    assert!(classify("Purpose").is_none());
    assert!(classify("Test Name").is_none());
    assert!(classify("Requirement Description").is_none());

    let found = classify("Purpose:").unwrap();
    assert_eq!(found.kind, FieldKind::Purpose);
    assert_eq!(found.inline.as_deref(), Some(""));

    let found = classify("Purpose :  spaced").unwrap();
    assert_eq!(found.inline.as_deref(), Some("spaced"));
}

#[test]
fn test_label_must_be_anchored_and_delimited() {
    assert!(classify("The Purpose: of this clause").is_none());
    assert!(classify("Purposeful text").is_none());
    assert!(classify("Purpose of the test is to verify").is_none());
    assert!(classify("Test Names: plural").is_none());
}

#[test]
fn test_execution_steps_header_has_no_inline_value() {
    let found = classify("Execution Steps:").unwrap();
    assert_eq!(found.kind, FieldKind::ExecutionStepsHeader);
    assert_eq!(found.inline, None);

    let found = classify("execution steps for the tester").unwrap();
    assert_eq!(found.kind, FieldKind::ExecutionStepsHeader);
}

#[test]
fn test_classify_kind_only_tries_one_label() {
    let grammar = FieldGrammar::shared();
    assert!(grammar
        .classify_kind(FieldKind::Purpose, "Test Name: T1")
        .is_none());
    let found = grammar
        .classify_kind(FieldKind::TestName, "Test Name: T1")
        .unwrap();
    assert_eq!(found.inline.as_deref(), Some("T1"));
}

#[test]
fn test_kind_metadata() {
    assert_eq!(FieldKind::ThreatReferences.record_kind(), RecordKind::Requirement);
    assert_eq!(FieldKind::EvidenceFormat.record_kind(), RecordKind::TestCase);
    assert!(FieldKind::RequirementDescription.is_continuable());
    assert!(FieldKind::ExecutionStepsHeader.is_continuable());
    assert!(!FieldKind::RequirementReference.is_continuable());
    assert!(!FieldKind::ThreatReferences.is_continuable());
    assert!(FieldKind::TestName.opens_record());
    assert!(!FieldKind::Purpose.opens_record());
}
