//! Rule identifier checks.
//!
//! [`IdentifierExistenceValidator`] is rule-scoped. [`IdentifierUniquenessValidator`]
//! accumulates every identifier it sees and reports collisions in `finalize`.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::lint::{Issue, IssueKind, IssuePayload, RuleCheck, Validator, ValidatorId};
use crate::rule::{RuleRef, SigmaRule};

/// Flags rules without an identifier.
pub struct IdentifierExistenceValidator;

impl RuleCheck for IdentifierExistenceValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("identifier_existence")
    }

    fn description(&self) -> &str {
        "Checks that every rule has an identifier"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        if rule.id.is_some() {
            return vec![];
        }
        vec![Issue::for_rule(
            IssueKind::IdentifierExistence,
            rule,
            IssuePayload::None,
        )]
    }
}

/// Identifier → rules seen with it, in first-seen order.
#[derive(Debug, Default)]
pub struct IdentifierIndex {
    seen: IndexMap<Uuid, Vec<RuleRef>>,
}

impl IdentifierIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rule. Rules without an identifier are ignored.
    pub fn observe(&mut self, rule: &SigmaRule) {
        if let Some(id) = rule.id {
            self.seen.entry(id).or_default().push(RuleRef::from(rule));
        }
    }

    /// Fold another partial index into this one.
    pub fn merge(&mut self, other: IdentifierIndex) {
        for (id, rules) in other.seen {
            self.seen.entry(id).or_default().extend(rules);
        }
    }

    /// Consume the index, one collision issue per shared identifier.
    pub fn finish(self) -> Vec<Issue> {
        self.seen
            .into_iter()
            .filter(|(_, rules)| rules.len() > 1)
            .map(|(id, rules)| {
                Issue::new(
                    IssueKind::IdentifierCollision,
                    rules,
                    IssuePayload::Identifier { id },
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Flags identifiers shared by more than one rule.
#[derive(Debug, Default)]
pub struct IdentifierUniquenessValidator {
    index: IdentifierIndex,
}

impl IdentifierUniquenessValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for IdentifierUniquenessValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("identifier_uniqueness")
    }

    fn description(&self) -> &str {
        "Checks that no two rules share an identifier"
    }

    fn validate(&mut self, rule: &SigmaRule) -> Vec<Issue> {
        self.index.observe(rule);
        vec![]
    }

    fn finalize(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.index).finish()
    }
}
