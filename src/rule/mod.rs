//! The Sigma rule object model.
//!
//! Rules arrive here already parsed: YAML loading and condition parsing happen
//! upstream, and a rule that reaches the linter is structurally valid. The
//! types in this module are what validators inspect. Nothing in the crate
//! mutates them.
//!
//! # Example
//!
//! ```
//! use sigmalint::rule::{ConditionExpr, Detection, DetectionItem, Modifier, SigmaRule};
//!
//! let rule = SigmaRule::new("Whoami Execution")
//!     .with_detection(
//!         "selection",
//!         Detection::new().with_item(DetectionItem::new(
//!             "CommandLine",
//!             vec![Modifier::Contains],
//!             vec!["whoami".into()],
//!         )),
//!     )
//!     .with_condition(ConditionExpr::identifier("selection"))
//!     .with_tag("attack.discovery".parse().unwrap());
//!
//! assert_eq!(rule.detection_items().count(), 1);
//! ```

pub mod condition;
pub mod detection;
pub mod value;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::error::LintError;

pub use condition::{ConditionExpr, DetectionRef, Quantifier};
pub use detection::{Detection, DetectionEntry, DetectionItem, DetectionItems, Modifier};
pub use value::{RuleValue, SigmaString, StringPart};

/// A tag such as `attack.t1059.001`, split on the first `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleTag {
    pub namespace: String,
    pub name: String,
}

impl RuleTag {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RuleTag {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((namespace, name)) => Ok(Self::new(namespace, name)),
            None => Err(LintError::InvalidTag { tag: s.to_string() }),
        }
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl Serialize for RuleTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A parsed Sigma rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SigmaRule {
    /// Stable identifier. Optional in the grammar, expected by convention.
    pub id: Option<Uuid>,
    pub title: String,
    /// Named sub-detections in declaration order.
    pub detections: IndexMap<String, Detection>,
    /// One tree per condition. Most rules have exactly one.
    pub conditions: Vec<ConditionExpr>,
    pub tags: Vec<RuleTag>,
    /// File the rule was loaded from, when known.
    pub source: Option<PathBuf>,
}

impl SigmaRule {
    /// Create an empty rule with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Add a named sub-detection. A repeated name replaces the earlier one in place.
    pub fn with_detection(mut self, name: impl Into<String>, detection: Detection) -> Self {
        self.detections.insert(name.into(), detection);
        self
    }

    pub fn with_condition(mut self, condition: ConditionExpr) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_tag(mut self, tag: RuleTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Every field match of every sub-detection, in declaration order.
    pub fn detection_items(&self) -> impl Iterator<Item = &DetectionItem> {
        self.detections.values().flat_map(Detection::items)
    }

    /// Every string value of every field match, in declaration order.
    pub fn string_values(&self) -> impl Iterator<Item = &SigmaString> {
        self.detection_items()
            .flat_map(|item| item.values.iter())
            .filter_map(RuleValue::as_sigma_string)
    }
}

/// The identity of a rule as carried by an issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RuleRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl From<&SigmaRule> for RuleRef {
    fn from(rule: &SigmaRule) -> Self {
        Self {
            id: rule.id,
            title: rule.title.clone(),
            source: rule.source.clone(),
        }
    }
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => write!(f, "'{}' ({})", self.title, path.display()),
            None => write!(f, "'{}'", self.title),
        }
    }
}
