//! Validator registry.
//!
//! The [`ValidatorRegistry`] maps stable validator names to factories.
//! Validators can carry per-run state, so the registry hands out a fresh
//! instance every time one is requested.

use std::collections::BTreeMap;

use super::validator::{Validator, ValidatorId};
use super::validators::{
    AttackTagValidator, ControlCharacterValidator, DanglingDetectionValidator,
    DoubleWildcardValidator, IdentifierExistenceValidator, IdentifierUniquenessValidator,
    InvalidModifierCombinationsValidator, NumberAsStringValidator, TlpStandard, TlpTagValidator,
    WildcardsInsteadOfModifiersValidator,
};
use crate::error::{LintError, Result};
use crate::taxonomy::Taxonomy;

/// Shared inputs for building validators.
#[derive(Debug, Clone, Default)]
pub struct ValidatorContext {
    pub taxonomy: Taxonomy,
}

impl ValidatorContext {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// A context backed by the bundled ATT&CK catalog.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(Taxonomy::bundled()?))
    }
}

/// Builds a fresh validator.
pub type ValidatorFactory = fn(&ValidatorContext) -> Result<Box<dyn Validator>>;

/// Registry of all available validators.
pub struct ValidatorRegistry {
    factories: BTreeMap<ValidatorId, ValidatorFactory>,
}

impl ValidatorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in validators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("identifier_existence", |_| {
            Ok(Box::new(IdentifierExistenceValidator))
        });
        registry.register("identifier_uniqueness", |_| {
            Ok(Box::new(IdentifierUniquenessValidator::new()))
        });
        registry.register("dangling_detection", |_| Ok(Box::new(DanglingDetectionValidator)));
        registry.register("invalid_modifier_combinations", |_| {
            Ok(Box::new(InvalidModifierCombinationsValidator))
        });
        registry.register("attack_tag", |ctx| {
            Ok(Box::new(AttackTagValidator::new(&ctx.taxonomy)?))
        });
        registry.register("tlpv1_tag", |_| Ok(Box::new(TlpTagValidator::new(TlpStandard::V1))));
        registry.register("tlpv2_tag", |_| Ok(Box::new(TlpTagValidator::new(TlpStandard::V2))));
        registry.register("tlp_tag", |_| Ok(Box::new(TlpTagValidator::new(TlpStandard::Any))));
        registry.register("double_wildcard", |_| Ok(Box::new(DoubleWildcardValidator)));
        registry.register("number_as_string", |_| Ok(Box::new(NumberAsStringValidator)));
        registry.register("control_character", |_| Ok(Box::new(ControlCharacterValidator)));
        registry.register("wildcards_instead_of_modifiers", |_| {
            Ok(Box::new(WildcardsInsteadOfModifiersValidator))
        });
        registry
    }

    /// Register a validator factory under `id`.
    pub fn register(&mut self, id: impl Into<String>, factory: ValidatorFactory) {
        self.factories.insert(ValidatorId::new(id), factory);
    }

    pub fn contains(&self, id: &ValidatorId) -> bool {
        self.factories.contains_key(id)
    }

    /// Build a fresh instance of the validator registered as `id`.
    pub fn create(&self, id: &ValidatorId, ctx: &ValidatorContext) -> Result<Box<dyn Validator>> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| LintError::UnknownValidator {
                name: id.to_string(),
            })?;
        factory(ctx)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &ValidatorId> {
        self.factories.keys()
    }

    /// Get the number of registered validators.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
