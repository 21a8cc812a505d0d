use super::{Node, Requirement, Section, Specification, Summary, TestCase};
use crate::grammar::FieldKind;
use serde_json::json;

fn sample() -> Specification {
    Specification {
        name: "3GPP TS 33.117".to_string(),
        children: vec![Node::Section(Section {
            title: "4 Requirements".to_string(),
            level: 1,
            children: vec![
                Node::Section(Section {
                    title: "4.2.3 Logging".to_string(),
                    level: 2,
                    children: vec![
                        Node::Requirement(Requirement {
                            name: "Logging".to_string(),
                            description: Some("System shall log.".to_string()),
                            ..Requirement::default()
                        }),
                        Node::TestCase(TestCase {
                            name: "TC_LOG".to_string(),
                            ..TestCase::default()
                        }),
                    ],
                }),
                Node::TestCase(TestCase {
                    name: "TC_TOP".to_string(),
                    ..TestCase::default()
                }),
            ],
        })],
    }
}

#[test]
fn test_summary_counts_every_depth() {
    assert_eq!(
        sample().summary(),
        Summary {
            sections: 2,
            requirements: 1,
            test_cases: 2,
        }
    );
    assert_eq!(Specification::new("empty").summary(), Summary::default());
}

#[test]
fn test_json_shape_omits_absent_fields() {
    let value = serde_json::to_value(sample()).unwrap();
    let logging = &value["children"][0]["children"][0];

    assert_eq!(logging["kind"], "section");
    assert_eq!(
        logging["children"][0],
        json!({"kind": "requirement", "name": "Logging", "description": "System shall log."})
    );
    assert_eq!(
        logging["children"][1],
        json!({"kind": "test_case", "name": "TC_LOG"})
    );
}

#[test]
fn test_json_is_readable_back() {
    let spec = sample();
    let text = serde_json::to_string(&spec).unwrap();
    let back: Specification = serde_json::from_str(&text).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn test_field_slots_follow_record_kind() {
    let mut req = Node::Requirement(Requirement::default());
    assert!(req.field_mut(FieldKind::ThreatReferences).is_some());
    assert!(req.field_mut(FieldKind::Purpose).is_none());
    assert!(req.field_mut(FieldKind::RequirementName).is_none());

    let mut tc = Node::TestCase(TestCase::default());
    *tc.field_mut(FieldKind::ExecutionStepsHeader).unwrap() = Some("1. Go".to_string());
    let Node::TestCase(tc) = tc else {
        unreachable!()
    };
    assert_eq!(tc.execution_steps.as_deref(), Some("1. Go"));
    assert_eq!(tc.fields()[2], (FieldKind::ExecutionStepsHeader, Some("1. Go")));

    let mut section = Node::Section(Section {
        title: "A".to_string(),
        level: 1,
        children: Vec::new(),
    });
    assert!(section.field_mut(FieldKind::Purpose).is_none());
    assert!(section.children_mut().is_some());
    assert!(req.children().is_none());
}
