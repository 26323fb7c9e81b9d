//! Library integration tests.

use sigmalint::lint::{highest_severity, Issue, IssueKind, IssuePayload, Severity};
use sigmalint::rule::SigmaRule;
use sigmalint::LintError;

#[test]
fn error_types_are_public() {
    let err = LintError::UnknownValidator {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> sigmalint::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn taxonomy_is_bundled() {
    let taxonomy = sigmalint::taxonomy::Taxonomy::bundled().unwrap();
    assert_eq!(taxonomy.tactics["TA0011"], "command-and-control");
    assert!(taxonomy.techniques.contains_key("T1001.001"));
}

#[test]
fn issue_display_is_one_line() {
    let rule = SigmaRule::new("Suspicious Whoami");
    let issue = Issue::for_rule(
        IssueKind::DanglingDetection,
        &rule,
        IssuePayload::Detection {
            name: "unreferenced".into(),
        },
    );

    assert_eq!(
        issue.to_string(),
        "rule 'Suspicious Whoami': sub-detection 'unreferenced' is never used in its condition"
    );
}

#[test]
fn highest_severity_picks_maximum() {
    let rule = SigmaRule::new("Test");
    let issues = vec![
        Issue::for_rule(IssueKind::DoubleWildcard, &rule, IssuePayload::None),
        Issue::for_rule(IssueKind::ControlCharacter, &rule, IssuePayload::None),
        Issue::for_rule(IssueKind::IdentifierExistence, &rule, IssuePayload::None),
    ];

    assert_eq!(highest_severity(&issues), Some(Severity::High));
    assert_eq!(highest_severity(&[]), None);
}

#[test]
fn issues_serialize_with_payload_fields() {
    let rule = SigmaRule::new("Test");
    let issue = Issue::for_rule(
        IssueKind::DanglingDetection,
        &rule,
        IssuePayload::Detection {
            name: "filter".into(),
        },
    );

    let json = serde_json::to_value(&issue).unwrap();
    assert_eq!(json["kind"], "dangling_detection");
    assert_eq!(json["type"], "detection");
    assert_eq!(json["name"], "filter");
    assert_eq!(json["rules"][0]["title"], "Test");
}
