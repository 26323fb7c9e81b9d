//! Validation issues.
//!
//! This module provides the [`Issue`] type for representing defects found
//! during rule validation. Issues are plain values: two issues with the same
//! kind, rules and payload compare equal.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::validator::Severity;
use crate::rule::{DetectionItem, Modifier, RuleRef, RuleTag, SigmaRule, SigmaString};

/// The defect class of an issue.
///
/// The string ids returned by [`IssueKind::id`] are a stable contract for
/// renderers and CI gating. Do not rename them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueKind {
    IdentifierExistence,
    IdentifierCollision,
    DanglingDetection,
    AllWithoutContains,
    Base64OffsetWithoutContains,
    ModifierAppliedMultiple,
    InvalidAttackTag,
    InvalidTlpTag,
    DoubleWildcard,
    NumberAsString,
    ControlCharacter,
    WildcardsInsteadOfContains,
    WildcardInsteadOfStartswith,
    WildcardInsteadOfEndswith,
}

impl IssueKind {
    pub fn id(&self) -> &'static str {
        match self {
            Self::IdentifierExistence => "identifier_existence",
            Self::IdentifierCollision => "identifier_collision",
            Self::DanglingDetection => "dangling_detection",
            Self::AllWithoutContains => "all_without_contains",
            Self::Base64OffsetWithoutContains => "base64offset_without_contains",
            Self::ModifierAppliedMultiple => "modifier_applied_multiple",
            Self::InvalidAttackTag => "invalid_attack_tag",
            Self::InvalidTlpTag => "invalid_tlp_tag",
            Self::DoubleWildcard => "double_wildcard",
            Self::NumberAsString => "number_as_string",
            Self::ControlCharacter => "control_character",
            Self::WildcardsInsteadOfContains => "wildcards_instead_of_contains",
            Self::WildcardInsteadOfStartswith => "wildcard_instead_of_startswith",
            Self::WildcardInsteadOfEndswith => "wildcard_instead_of_endswith",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::IdentifierExistence => "Rule has no identifier",
            Self::IdentifierCollision => "Rule identifier used by multiple rules",
            Self::DanglingDetection => "Rule defines detection that is not referenced in its condition",
            Self::AllWithoutContains => "'all' modifier without a contains-style modifier",
            Self::Base64OffsetWithoutContains => {
                "'base64offset' modifier without a following contains-style modifier"
            }
            Self::ModifierAppliedMultiple => "Modifier applied more than once",
            Self::InvalidAttackTag => "Invalid MITRE ATT&CK tagging",
            Self::InvalidTlpTag => "Invalid TLP tagging",
            Self::DoubleWildcard => "String contains multiple consecutive '*' wildcards",
            Self::NumberAsString => "Numeric value stored as string",
            Self::ControlCharacter => "String contains control character",
            Self::WildcardsInsteadOfContains => "Wildcards used where 'contains' modifier fits",
            Self::WildcardInsteadOfStartswith => "Wildcard used where 'startswith' modifier fits",
            Self::WildcardInsteadOfEndswith => "Wildcard used where 'endswith' modifier fits",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::IdentifierCollision | Self::ControlCharacter => Severity::High,
            Self::IdentifierExistence
            | Self::DanglingDetection
            | Self::AllWithoutContains
            | Self::Base64OffsetWithoutContains
            | Self::ModifierAppliedMultiple
            | Self::InvalidAttackTag
            | Self::InvalidTlpTag => Severity::Medium,
            Self::DoubleWildcard
            | Self::NumberAsString
            | Self::WildcardsInsteadOfContains
            | Self::WildcardInsteadOfStartswith
            | Self::WildcardInsteadOfEndswith => Severity::Low,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for IssueKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Kind-specific data of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssuePayload {
    None,
    Identifier { id: Uuid },
    Detection { name: String },
    Tag { tag: RuleTag },
    Value { value: SigmaString },
    DetectionItem { item: DetectionItem },
    RepeatedModifiers {
        item: DetectionItem,
        modifiers: BTreeSet<Modifier>,
    },
}

/// A defect found by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Implicated rules. Cross-rule issues list every rule involved.
    pub rules: Vec<RuleRef>,
    #[serde(flatten)]
    pub payload: IssuePayload,
}

impl Issue {
    /// Create a new issue.
    pub fn new(kind: IssueKind, rules: Vec<RuleRef>, payload: IssuePayload) -> Self {
        Self {
            kind,
            rules,
            payload,
        }
    }

    /// Create an issue about a single rule.
    pub fn for_rule(kind: IssueKind, rule: &SigmaRule, payload: IssuePayload) -> Self {
        Self::new(kind, vec![RuleRef::from(rule)], payload)
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// The finding without the rule prefix.
    pub fn message(&self) -> String {
        match (&self.kind, &self.payload) {
            (IssueKind::IdentifierExistence, _) => "rule has no identifier".to_string(),
            (IssueKind::IdentifierCollision, IssuePayload::Identifier { id }) => {
                format!("identifier {} is used by {} rules", id, self.rules.len())
            }
            (IssueKind::DanglingDetection, IssuePayload::Detection { name }) => {
                format!("sub-detection '{}' is never used in its condition", name)
            }
            (IssueKind::AllWithoutContains, IssuePayload::DetectionItem { item }) => format!(
                "'{}' uses the 'all' modifier without a contains-style modifier",
                item
            ),
            (IssueKind::Base64OffsetWithoutContains, IssuePayload::DetectionItem { item }) => {
                format!(
                    "'{}' uses 'base64offset' without a following contains-style modifier",
                    item
                )
            }
            (IssueKind::ModifierAppliedMultiple, IssuePayload::RepeatedModifiers { item, modifiers }) => {
                let names: Vec<_> = modifiers.iter().map(Modifier::as_str).collect();
                format!("'{}' applies {} more than once", item, names.join(", "))
            }
            (IssueKind::InvalidAttackTag, IssuePayload::Tag { tag }) => {
                format!("invalid ATT&CK tag '{}'", tag)
            }
            (IssueKind::InvalidTlpTag, IssuePayload::Tag { tag }) => {
                format!("invalid TLP tag '{}'", tag)
            }
            (IssueKind::DoubleWildcard, IssuePayload::Value { value }) => {
                format!("value '{}' contains consecutive wildcards", value)
            }
            (IssueKind::NumberAsString, IssuePayload::Value { value }) => {
                format!("value '{}' is a number stored as a string", value)
            }
            (IssueKind::ControlCharacter, IssuePayload::Value { value }) => format!(
                "value '{}' contains a control character",
                value.to_string().escape_debug()
            ),
            (IssueKind::WildcardsInsteadOfContains, IssuePayload::DetectionItem { item }) => {
                format!("'{}' wraps every value in wildcards, use '|contains'", item)
            }
            (IssueKind::WildcardInsteadOfStartswith, IssuePayload::DetectionItem { item }) => {
                format!("'{}' ends every value with a wildcard, use '|startswith'", item)
            }
            (IssueKind::WildcardInsteadOfEndswith, IssuePayload::DetectionItem { item }) => {
                format!("'{}' starts every value with a wildcard, use '|endswith'", item)
            }
            (kind, _) => kind.description().to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<_> = self.rules.iter().map(ToString::to_string).collect();
        let noun = if self.rules.len() == 1 { "rule" } else { "rules" };
        write!(f, "{} {}: {}", noun, rules.join(", "), self.message())
    }
}

/// The highest severity among `issues`, or `None` when the run is clean.
pub fn highest_severity(issues: &[Issue]) -> Option<Severity> {
    issues.iter().map(Issue::severity).max()
}
