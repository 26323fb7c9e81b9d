//! Dangling detection check.
//!
//! Reports sub-detections that no condition of the rule can reach.

use crate::lint::resolver::unreferenced_detections;
use crate::lint::{Issue, IssueKind, IssuePayload, RuleCheck, ValidatorId};
use crate::rule::SigmaRule;

/// Flags sub-detections that are defined but never referenced.
pub struct DanglingDetectionValidator;

impl RuleCheck for DanglingDetectionValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("dangling_detection")
    }

    fn description(&self) -> &str {
        "Detects sub-detections not referenced by any condition"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        unreferenced_detections(rule)
            .into_iter()
            .map(|name| {
                Issue::for_rule(
                    IssueKind::DanglingDetection,
                    rule,
                    IssuePayload::Detection {
                        name: name.to_string(),
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{ConditionExpr, Detection, DetectionItem, DetectionRef};

    fn detection(field: &str) -> Detection {
        Detection::new().with_item(DetectionItem::new(field, vec![], vec!["val".into()]))
    }

    fn referenced_rule() -> SigmaRule {
        SigmaRule::new("Test")
            .with_detection("referenced1", detection("field1"))
            .with_detection("referenced2", detection("field2"))
            .with_detection("referenced3", detection("field3"))
    }

    fn main_condition() -> ConditionExpr {
        ConditionExpr::and([
            ConditionExpr::or([
                ConditionExpr::identifier("referenced1"),
                ConditionExpr::identifier("referenced2"),
            ]),
            ConditionExpr::identifier("referenced3"),
        ])
    }

    #[test]
    fn detects_unreferenced_detection() {
        let rule = referenced_rule()
            .with_detection("unreferenced", detection("field4"))
            .with_condition(main_condition());

        assert_eq!(
            DanglingDetectionValidator.check(&rule),
            vec![Issue::for_rule(
                IssueKind::DanglingDetection,
                &rule,
                IssuePayload::Detection {
                    name: "unreferenced".into()
                },
            )]
        );
    }

    #[test]
    fn passes_when_everything_is_referenced() {
        let rule = referenced_rule().with_condition(main_condition());
        assert!(DanglingDetectionValidator.check(&rule).is_empty());
    }

    #[test]
    fn passes_with_wildcard_selector() {
        let rule =
            referenced_rule().with_condition(ConditionExpr::one_of(DetectionRef::pattern("referenced*")));
        assert!(DanglingDetectionValidator.check(&rule).is_empty());
    }

    #[test]
    fn passes_with_them() {
        let rule = referenced_rule().with_condition(ConditionExpr::one_of(DetectionRef::Them));
        assert!(DanglingDetectionValidator.check(&rule).is_empty());
    }

    #[test]
    fn passes_without_detections() {
        let rule = SigmaRule::new("Empty");
        assert!(DanglingDetectionValidator.check(&rule).is_empty());
    }

    #[test]
    fn reports_each_dangling_name_in_declaration_order() {
        let rule = SigmaRule::new("Test")
            .with_detection("filter_b", detection("b"))
            .with_detection("selection", detection("s"))
            .with_detection("filter_a", detection("a"))
            .with_condition(ConditionExpr::identifier("selection"));

        let names: Vec<_> = DanglingDetectionValidator
            .check(&rule)
            .into_iter()
            .map(|issue| match issue.payload {
                IssuePayload::Detection { name } => name,
                other => panic!("unexpected payload: {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["filter_b", "filter_a"]);
    }

    #[test]
    fn repeated_checks_are_identical() {
        let rule = referenced_rule()
            .with_detection("unreferenced", detection("field4"))
            .with_condition(main_condition());

        assert_eq!(
            DanglingDetectionValidator.check(&rule),
            DanglingDetectionValidator.check(&rule)
        );
    }
}
