//! Parsed condition trees.
//!
//! These are the output of the condition parser. The linter only walks them.

use serde::Serialize;

/// What an `x of ...` selector points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionRef {
    /// A single sub-detection by name.
    Name(String),
    /// A glob over sub-detection names, e.g. `selection_*`.
    Pattern(String),
    /// The `them` keyword: every sub-detection of the rule.
    Them,
}

impl DetectionRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }
}

/// How many of the selected sub-detections must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantifier {
    /// `1 of`
    Any,
    /// `all of`
    All,
    /// `n of`
    Count(u32),
}

/// A boolean condition over sub-detections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionExpr {
    Identifier(String),
    Of {
        quantifier: Quantifier,
        target: DetectionRef,
    },
    And(Vec<ConditionExpr>),
    Or(Vec<ConditionExpr>),
    Not(Box<ConditionExpr>),
}

impl ConditionExpr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn and(operands: impl IntoIterator<Item = ConditionExpr>) -> Self {
        Self::And(operands.into_iter().collect())
    }

    pub fn or(operands: impl IntoIterator<Item = ConditionExpr>) -> Self {
        Self::Or(operands.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: ConditionExpr) -> Self {
        Self::Not(Box::new(operand))
    }

    /// `1 of <target>`
    pub fn one_of(target: DetectionRef) -> Self {
        Self::Of {
            quantifier: Quantifier::Any,
            target,
        }
    }

    /// `all of <target>`
    pub fn all_of(target: DetectionRef) -> Self {
        Self::Of {
            quantifier: Quantifier::All,
            target,
        }
    }
}
