//! Built-in validators.
//!
//! This module contains all the validators that come with sigmalint.

pub mod condition;
pub mod metadata;
pub mod modifiers;
pub mod tags;
pub mod values;

pub use condition::DanglingDetectionValidator;
pub use metadata::{IdentifierExistenceValidator, IdentifierIndex, IdentifierUniquenessValidator};
pub use modifiers::InvalidModifierCombinationsValidator;
pub use tags::{AttackTagValidator, TlpStandard, TlpTagValidator};
pub use values::{
    ControlCharacterValidator, DoubleWildcardValidator, NumberAsStringValidator,
    WildcardsInsteadOfModifiersValidator,
};
