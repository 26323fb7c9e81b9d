//! Modifier combination check.

use crate::lint::modifiers::{analyze, ModifierFinding};
use crate::lint::{Issue, IssueKind, IssuePayload, RuleCheck, ValidatorId};
use crate::rule::SigmaRule;

/// Flags invalid or redundant modifier combinations on each field match.
pub struct InvalidModifierCombinationsValidator;

impl RuleCheck for InvalidModifierCombinationsValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("invalid_modifier_combinations")
    }

    fn description(&self) -> &str {
        "Detects modifier combinations that do not match what they appear to"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        let mut issues = Vec::new();

        for item in rule.detection_items() {
            for finding in analyze(item) {
                let (kind, payload) = match finding {
                    ModifierFinding::AllWithoutContainment => (
                        IssueKind::AllWithoutContains,
                        IssuePayload::DetectionItem { item: item.clone() },
                    ),
                    ModifierFinding::Base64OffsetWithoutContainment => (
                        IssueKind::Base64OffsetWithoutContains,
                        IssuePayload::DetectionItem { item: item.clone() },
                    ),
                    ModifierFinding::AppliedMultiple(modifiers) => (
                        IssueKind::ModifierAppliedMultiple,
                        IssuePayload::RepeatedModifiers {
                            item: item.clone(),
                            modifiers,
                        },
                    ),
                };
                issues.push(Issue::for_rule(kind, rule, payload));
            }
        }

        issues
    }
}
