//! Validation driver.
//!
//! [`RuleValidator`] owns a set of validators and feeds rules through them,
//! honouring per-rule exclusions.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::issue::Issue;
use super::registry::{ValidatorContext, ValidatorRegistry};
use super::validator::{Validator, ValidatorId};
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::rule::SigmaRule;

/// Runs validators over rules and collects their issues.
pub struct RuleValidator {
    validators: Vec<Box<dyn Validator>>,
    exclusions: HashMap<Uuid, HashSet<ValidatorId>>,
}

impl RuleValidator {
    /// Create a driver running `validators` with no exclusions.
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self {
            validators,
            exclusions: HashMap::new(),
        }
    }

    /// Skip the named validators for the given rule identifiers.
    pub fn with_exclusions(mut self, exclusions: HashMap<Uuid, HashSet<ValidatorId>>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Build a driver from a config using the built-in validators.
    pub fn from_config(config: &ValidatorConfig, ctx: &ValidatorContext) -> Result<Self> {
        Self::from_config_with(config, &ValidatorRegistry::with_builtins(), ctx)
    }

    /// Build a driver from a config using the validators in `registry`.
    pub fn from_config_with(
        config: &ValidatorConfig,
        registry: &ValidatorRegistry,
        ctx: &ValidatorContext,
    ) -> Result<Self> {
        let validators = config
            .selected_validators(registry)?
            .iter()
            .map(|id| registry.create(id, ctx))
            .collect::<Result<Vec<_>>>()?;
        let exclusions = config.exclusion_sets(registry)?;

        tracing::debug!(
            validators = validators.len(),
            exclusions = exclusions.len(),
            "instantiated validators"
        );
        Ok(Self::new(validators).with_exclusions(exclusions))
    }

    /// Ids of the validators this driver runs, in run order.
    pub fn validator_ids(&self) -> Vec<ValidatorId> {
        self.validators.iter().map(|v| v.id()).collect()
    }

    /// Run every validator that is not excluded for `rule`.
    pub fn validate_rule(&mut self, rule: &SigmaRule) -> Vec<Issue> {
        tracing::trace!(rule = %rule.title, "validating rule");
        let excluded = rule.id.and_then(|id| self.exclusions.get(&id));

        let mut issues = Vec::new();
        for validator in &mut self.validators {
            if let Some(excluded) = excluded {
                let id = validator.id();
                if excluded.contains(&id) {
                    tracing::debug!(rule = %rule.title, validator = %id, "validator excluded");
                    continue;
                }
            }
            issues.extend(validator.validate(rule));
        }
        issues
    }

    /// Collect collection-level issues from every validator.
    pub fn finalize(&mut self) -> Vec<Issue> {
        tracing::debug!(validators = self.validators.len(), "finalizing validators");
        self.validators
            .iter_mut()
            .flat_map(|validator| validator.finalize())
            .collect()
    }

    /// Validate every rule, then finalize.
    pub fn validate_rules<'a>(&mut self, rules: impl IntoIterator<Item = &'a SigmaRule>) -> Vec<Issue> {
        let mut issues: Vec<Issue> = rules
            .into_iter()
            .flat_map(|rule| self.validate_rule(rule))
            .collect();
        issues.extend(self.finalize());
        issues
    }
}
