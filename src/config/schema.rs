//! Validator configuration schema.
//!
//! ```yaml
//! validators:
//!   - all
//!   - -tlpv1_tag
//! exclusions:
//!   5013332f-8a70-4e04-bcc1-06a98a2cca2e: dangling_detection
//!   19855ce4-00b3-4d07-8e57-f6c6955ce4e7: [number_as_string, double_wildcard]
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{LintError, Result};
use crate::lint::{ValidatorId, ValidatorRegistry};

/// Selects every registered validator.
pub const ALL_VALIDATORS: &str = "all";

/// Root validator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Selection directives, applied in order.
    ///
    /// `all` selects every validator, `-name` removes one, anything else adds one.
    pub validators: Vec<String>,

    /// Validators to skip per rule identifier.
    pub exclusions: BTreeMap<Uuid, OneOrMany>,
}

/// A single validator name or a list of names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn names(&self) -> &[String] {
        match self {
            OneOrMany::One(name) => std::slice::from_ref(name),
            OneOrMany::Many(names) => names,
        }
    }
}

impl ValidatorConfig {
    /// Resolve the selection directives against `registry`.
    ///
    /// # Errors
    ///
    /// Returns `RemoveUnknownValidator` when `-name` removes a validator that is
    /// not selected at that point, and `UnknownValidator` when the final
    /// selection names a validator `registry` does not know.
    pub fn selected_validators(&self, registry: &ValidatorRegistry) -> Result<BTreeSet<ValidatorId>> {
        let mut selected = BTreeSet::new();

        for directive in &self.validators {
            if directive == ALL_VALIDATORS {
                selected = registry.ids().cloned().collect();
            } else if let Some(name) = directive.strip_prefix('-') {
                if !selected.remove(&ValidatorId::new(name)) {
                    return Err(LintError::RemoveUnknownValidator {
                        name: name.to_string(),
                    });
                }
            } else {
                selected.insert(ValidatorId::new(directive.as_str()));
            }
        }

        ensure_known(registry, &selected)?;
        Ok(selected)
    }

    /// Per-rule exclusion sets with every name checked against `registry`.
    pub fn exclusion_sets(
        &self,
        registry: &ValidatorRegistry,
    ) -> Result<HashMap<Uuid, HashSet<ValidatorId>>> {
        self.exclusions
            .iter()
            .map(|(rule_id, names)| {
                let ids: HashSet<_> = names.names().iter().map(ValidatorId::new).collect();
                ensure_known(registry, &ids)?;
                Ok((*rule_id, ids))
            })
            .collect()
    }
}

fn ensure_known<'a>(
    registry: &ValidatorRegistry,
    ids: impl IntoIterator<Item = &'a ValidatorId>,
) -> Result<()> {
    match ids.into_iter().find(|id| !registry.contains(id)) {
        Some(id) => Err(LintError::UnknownValidator {
            name: id.to_string(),
        }),
        None => Ok(()),
    }
}
