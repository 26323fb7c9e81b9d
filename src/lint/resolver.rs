//! Condition reference resolution.
//!
//! Works out which sub-detections of a rule are reachable from its condition
//! trees. A name counts as referenced when any reference form reaches it,
//! wherever it sits in the boolean structure:
//!
//! - a bare identifier or `1 of name`,
//! - a glob such as `1 of selection_*`,
//! - the `them` keyword, which reaches every sub-detection.

use std::collections::HashSet;

use regex::Regex;

use crate::rule::{ConditionExpr, DetectionRef, SigmaRule};

/// A single reference found in a condition tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Name(&'a str),
    Pattern(&'a str),
    Them,
}

impl<'a> From<&'a DetectionRef> for Reference<'a> {
    fn from(target: &'a DetectionRef) -> Self {
        match target {
            DetectionRef::Name(name) => Reference::Name(name),
            DetectionRef::Pattern(pattern) => Reference::Pattern(pattern),
            DetectionRef::Them => Reference::Them,
        }
    }
}

/// Collect every reference in `expr`, in pre-order.
pub fn references(expr: &ConditionExpr) -> Vec<Reference<'_>> {
    let mut found = Vec::new();
    let mut stack = vec![expr];

    while let Some(node) = stack.pop() {
        match node {
            ConditionExpr::Identifier(name) => found.push(Reference::Name(name)),
            ConditionExpr::Of { target, .. } => found.push(Reference::from(target)),
            ConditionExpr::And(operands) | ConditionExpr::Or(operands) => {
                stack.extend(operands.iter().rev());
            }
            ConditionExpr::Not(operand) => stack.push(&**operand),
        }
    }

    found
}

/// A glob over sub-detection names. `*` matches any run, `?` one character.
#[derive(Debug, Clone)]
pub struct NamePattern {
    glob: String,
    regex: Option<Regex>,
}

impl NamePattern {
    pub fn new(glob: &str) -> Self {
        let translated = regex::escape(glob)
            .replace(r"\*", ".*")
            .replace(r"\?", ".");
        let regex = match Regex::new(&format!("^{}$", translated)) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!("Cannot compile pattern '{}', matching literally: {}", glob, e);
                None
            }
        };
        Self {
            glob: glob.to_string(),
            regex,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(name),
            None => self.glob == name,
        }
    }
}

/// Names of `rule`'s sub-detections reachable from any of its conditions.
///
/// References to names the rule does not define are ignored.
pub fn referenced_detections(rule: &SigmaRule) -> HashSet<&str> {
    let defined: Vec<&str> = rule.detections.keys().map(String::as_str).collect();
    let mut reached = HashSet::new();

    for condition in &rule.conditions {
        for reference in references(condition) {
            match reference {
                Reference::Name(name) => {
                    if let Some(&defined_name) = defined.iter().find(|d| **d == name) {
                        reached.insert(defined_name);
                    }
                }
                Reference::Pattern(glob) => {
                    let pattern = NamePattern::new(glob);
                    reached.extend(defined.iter().copied().filter(|d| pattern.matches(d)));
                }
                Reference::Them => {
                    reached.extend(defined.iter().copied());
                }
            }
            if reached.len() == defined.len() {
                return reached;
            }
        }
    }

    reached
}

/// Defined sub-detections no condition reaches, in declaration order.
pub fn unreferenced_detections(rule: &SigmaRule) -> Vec<&str> {
    let reached = referenced_detections(rule);
    rule.detections
        .keys()
        .map(String::as_str)
        .filter(|name| !reached.contains(name))
        .collect()
}
