//! Sigmalint - Quality checks for Sigma detection rules.
//!
//! Sigmalint inspects already-parsed Sigma rules and reports defects that a
//! parser accepts but a reviewer would reject: unused sub-detections,
//! contradictory modifier chains, unknown ATT&CK or TLP tags, suspicious
//! literal values and missing or duplicated rule identifiers.
//!
//! # Modules
//!
//! - [`config`] - Validator selection and per-rule exclusions
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Validators, the validation driver and output formatters
//! - [`rule`] - The Sigma rule object model
//! - [`taxonomy`] - MITRE ATT&CK tactic and technique catalog
//!
//! # Example
//!
//! ```
//! use sigmalint::config::ValidatorConfig;
//! use sigmalint::lint::{highest_severity, RuleValidator, Severity, ValidatorContext};
//! use sigmalint::rule::SigmaRule;
//!
//! let config = ValidatorConfig::from_yaml("validators: [all]").unwrap();
//! let ctx = ValidatorContext::bundled().unwrap();
//! let mut driver = RuleValidator::from_config(&config, &ctx).unwrap();
//!
//! let issues = driver.validate_rules([&SigmaRule::new("No identifier")]);
//! assert_eq!(highest_severity(&issues), Some(Severity::Medium));
//! ```

pub mod config;
pub mod error;
pub mod lint;
pub mod rule;
pub mod taxonomy;

pub use error::{LintError, Result};
