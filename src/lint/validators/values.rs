//! Literal value checks.
//!
//! Each check scans every string value of every field match and reports one
//! issue per offending value.

use std::sync::LazyLock;

use regex::Regex;

use crate::lint::{Issue, IssueKind, IssuePayload, RuleCheck, ValidatorId};
use crate::rule::{DetectionItem, RuleValue, SigmaRule, SigmaString, StringPart};

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("numeric pattern is valid"));

fn value_issues(
    rule: &SigmaRule,
    kind: IssueKind,
    offends: impl Fn(&SigmaString) -> bool,
) -> Vec<Issue> {
    rule.string_values()
        .filter(|value| offends(*value))
        .map(|value| {
            Issue::for_rule(
                kind,
                rule,
                IssuePayload::Value {
                    value: value.clone(),
                },
            )
        })
        .collect()
}

/// Flags `**` and similar accidental double globs.
pub struct DoubleWildcardValidator;

impl RuleCheck for DoubleWildcardValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("double_wildcard")
    }

    fn description(&self) -> &str {
        "Detects strings with consecutive '*' wildcards"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        value_issues(rule, IssueKind::DoubleWildcard, SigmaString::has_adjacent_wildcards)
    }
}

/// Flags quoted numbers such as `"4688"`.
pub struct NumberAsStringValidator;

impl RuleCheck for NumberAsStringValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("number_as_string")
    }

    fn description(&self) -> &str {
        "Detects numeric values stored as strings"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        value_issues(rule, IssueKind::NumberAsString, |value| {
            value.as_plain().is_some_and(|text| NUMERIC.is_match(text))
        })
    }
}

/// Flags raw control characters, usually an unintended YAML escape like `"\temp"`.
pub struct ControlCharacterValidator;

impl RuleCheck for ControlCharacterValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("control_character")
    }

    fn description(&self) -> &str {
        "Detects control characters in string values"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        value_issues(rule, IssueKind::ControlCharacter, |value| {
            value
                .plain_parts()
                .any(|text| text.chars().any(|c| c.is_ascii_control()))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WildcardShape {
    Both,
    Trailing,
    Leading,
}

fn wildcard_shape(value: &SigmaString) -> Option<WildcardShape> {
    match value.parts() {
        [StringPart::WildcardMulti, StringPart::Plain(_), StringPart::WildcardMulti] => {
            Some(WildcardShape::Both)
        }
        [StringPart::Plain(_), StringPart::WildcardMulti] => Some(WildcardShape::Trailing),
        [StringPart::WildcardMulti, StringPart::Plain(_)] => Some(WildcardShape::Leading),
        _ => None,
    }
}

/// The shape every value of `item` shares, if any.
fn common_shape(item: &DetectionItem) -> Option<WildcardShape> {
    let mut shapes = item.values.iter().map(|value| match value {
        RuleValue::String(s) => wildcard_shape(s),
        _ => None,
    });
    let first = shapes.next()??;
    shapes.all(|shape| shape == Some(first)).then_some(first)
}

/// Flags field matches whose values spell out a modifier with wildcards.
pub struct WildcardsInsteadOfModifiersValidator;

impl RuleCheck for WildcardsInsteadOfModifiersValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("wildcards_instead_of_modifiers")
    }

    fn description(&self) -> &str {
        "Detects wildcards used where contains/startswith/endswith fits"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        rule.detection_items()
            .filter(|item| item.modifiers.is_empty())
            .filter_map(|item| {
                let kind = match common_shape(item)? {
                    WildcardShape::Both => IssueKind::WildcardsInsteadOfContains,
                    WildcardShape::Trailing => IssueKind::WildcardInsteadOfStartswith,
                    WildcardShape::Leading => IssueKind::WildcardInsteadOfEndswith,
                };
                Some(Issue::for_rule(
                    kind,
                    rule,
                    IssuePayload::DetectionItem { item: item.clone() },
                ))
            })
            .collect()
    }
}
