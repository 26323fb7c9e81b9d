//! Rule validation.
//!
//! This module checks parsed Sigma rules for quality defects through
//! a pluggable validator system.
//!
//! # Overview
//!
//! The validation system consists of:
//!
//! - **Validators** - Individual checks ([`Validator`] and [`RuleCheck`] traits)
//! - **Registry** - Named factories for every available validator ([`ValidatorRegistry`])
//! - **Driver** - Runs validators over rules with exclusions ([`RuleValidator`])
//! - **Issues** - Defect reports with kind, severity and implicated rules ([`Issue`])
//!
//! # Example
//!
//! ```
//! use sigmalint::lint::{IssueKind, RuleValidator, Severity};
//! use sigmalint::lint::validators::DanglingDetectionValidator;
//! use sigmalint::rule::{ConditionExpr, Detection, DetectionItem, SigmaRule};
//!
//! let rule = SigmaRule::new("Test")
//!     .with_detection(
//!         "referenced",
//!         Detection::new().with_item(DetectionItem::new("a", vec![], vec!["x".into()])),
//!     )
//!     .with_detection(
//!         "unreferenced",
//!         Detection::new().with_item(DetectionItem::new("b", vec![], vec!["y".into()])),
//!     )
//!     .with_condition(ConditionExpr::identifier("referenced"));
//!
//! let mut driver = RuleValidator::new(vec![Box::new(DanglingDetectionValidator)]);
//! let issues = driver.validate_rules([&rule]);
//!
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, IssueKind::DanglingDetection);
//! assert_eq!(issues[0].severity(), Severity::Medium);
//! ```

pub mod issue;
pub mod modifiers;
pub mod output;
pub mod registry;
pub mod resolver;
pub mod runner;
pub mod validator;
pub mod validators;

pub use issue::{highest_severity, Issue, IssueKind, IssuePayload};
pub use output::{write_issues, HumanFormatter, IssueFormatter, JsonFormatter, OutputFormat};
pub use registry::{ValidatorContext, ValidatorFactory, ValidatorRegistry};
pub use runner::RuleValidator;
pub use validator::{RuleCheck, Severity, Validator, ValidatorId};
