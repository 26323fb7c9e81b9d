//! Validator definitions.
//!
//! This module provides the core traits and types for defining validators:
//!
//! - [`Validator`] - The two-phase contract every validator implements
//! - [`RuleCheck`] - Stateless, rule-scoped checks (blanket-implements `Validator`)
//! - [`ValidatorId`] - Stable identifier used in configuration
//! - [`Severity`] - Severity level for issues (Low, Medium, High, Critical)

use serde::Serialize;

use super::issue::Issue;
use crate::rule::SigmaRule;

/// Unique identifier for a validator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatorId(pub String);

impl ValidatorId {
    /// Create a new validator ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for issues.
///
/// Totally ordered so that CI gating can compare against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style or hygiene finding.
    Low,
    /// Likely a mistake, rule still works.
    Medium,
    /// Rule probably misses or mismatches events.
    High,
    /// Rule is broken.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A check run over a stream of rules.
///
/// `validate` is called once per rule, in any order. `finalize` is called once
/// after the last rule and returns the issues that only make sense across the
/// whole collection. Validators never mutate the rules they inspect.
pub trait Validator: Send {
    /// Unique identifier for this validator.
    fn id(&self) -> ValidatorId;

    /// Description of what this validator checks.
    fn description(&self) -> &str;

    /// Check one rule.
    fn validate(&mut self, rule: &SigmaRule) -> Vec<Issue>;

    /// Emit collection-level issues. Drains any accumulated state.
    fn finalize(&mut self) -> Vec<Issue> {
        Vec::new()
    }
}

/// A stateless check over a single rule.
///
/// Implementors hold no mutable state and can be shared across threads.
pub trait RuleCheck: Send + Sync {
    /// Unique identifier for this check.
    fn id(&self) -> ValidatorId;

    /// Description of what this check looks for.
    fn description(&self) -> &str;

    /// Check the rule and return any issues.
    fn check(&self, rule: &SigmaRule) -> Vec<Issue>;
}

impl<T: RuleCheck> Validator for T {
    fn id(&self) -> ValidatorId {
        RuleCheck::id(self)
    }

    fn description(&self) -> &str {
        RuleCheck::description(self)
    }

    fn validate(&mut self, rule: &SigmaRule) -> Vec<Issue> {
        self.check(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopCheck;

    impl RuleCheck for NoopCheck {
        fn id(&self) -> ValidatorId {
            ValidatorId::new("noop")
        }
        fn description(&self) -> &str {
            "Finds nothing"
        }
        fn check(&self, _rule: &SigmaRule) -> Vec<Issue> {
            vec![]
        }
    }

    #[test]
    fn validator_id_equality() {
        let id1 = ValidatorId::new("dangling_detection");
        let id2 = ValidatorId::new("dangling_detection");
        let id3 = ValidatorId::new("attack_tag");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn validator_id_display() {
        let id = ValidatorId::new("my_validator");
        assert_eq!(format!("{}", id), "my_validator");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Low), "low");
        assert_eq!(format!("{}", Severity::Medium), "medium");
        assert_eq!(format!("{}", Severity::High), "high");
        assert_eq!(format!("{}", Severity::Critical), "critical");
    }

    #[test]
    fn rule_check_is_a_validator_with_empty_finalize() {
        let mut validator: Box<dyn Validator> = Box::new(NoopCheck);
        let rule = SigmaRule::new("Test");

        assert_eq!(validator.id(), ValidatorId::new("noop"));
        assert!(validator.validate(&rule).is_empty());
        assert!(validator.finalize().is_empty());
    }
}
