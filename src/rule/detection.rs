//! Sub-detections, field matches and value modifiers.

use std::fmt;

use serde::Serialize;

use super::value::RuleValue;

/// A value modifier attached to a field match (`field|contains|all`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Contains,
    StartsWith,
    EndsWith,
    All,
    Base64,
    Base64Offset,
    Wide,
    Utf16le,
    Utf16be,
    Utf16,
    Windash,
    Re,
    Cidr,
    Exists,
    Expand,
    Gt,
    Gte,
    Lt,
    Lte,
    FieldRef,
}

impl Modifier {
    /// The modifier as written in a rule.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::All => "all",
            Self::Base64 => "base64",
            Self::Base64Offset => "base64offset",
            Self::Wide => "wide",
            Self::Utf16le => "utf16le",
            Self::Utf16be => "utf16be",
            Self::Utf16 => "utf16",
            Self::Windash => "windash",
            Self::Re => "re",
            Self::Cidr => "cidr",
            Self::Exists => "exists",
            Self::Expand => "expand",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::FieldRef => "fieldref",
        }
    }

    /// Substring-style matching: `contains`, `startswith`, `endswith`.
    pub fn is_containment(&self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }

    /// Whether repeating the modifier in one chain is a mistake.
    ///
    /// Only `base64` is stacked on purpose, to encode a value twice.
    pub fn applies_once(&self) -> bool {
        !matches!(self, Self::Base64)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field match: field name, ordered modifiers, values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DetectionItem {
    /// `None` for the unbound form that matches the value anywhere.
    pub field: Option<String>,
    pub modifiers: Vec<Modifier>,
    pub values: Vec<RuleValue>,
}

impl DetectionItem {
    /// Create a field match bound to `field`.
    pub fn new(field: impl Into<String>, modifiers: Vec<Modifier>, values: Vec<RuleValue>) -> Self {
        Self {
            field: Some(field.into()),
            modifiers,
            values,
        }
    }

    /// Create an unbound (keyword) match.
    pub fn unbound(modifiers: Vec<Modifier>, values: Vec<RuleValue>) -> Self {
        Self {
            field: None,
            modifiers,
            values,
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.field.is_none()
    }
}

impl fmt::Display for DetectionItem {
    /// Renders the YAML key form, e.g. `field|base64offset|contains`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field.as_deref().unwrap_or(""))?;
        for modifier in &self.modifiers {
            write!(f, "|{}", modifier)?;
        }
        Ok(())
    }
}

/// An entry of a [`Detection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetectionEntry {
    Item(DetectionItem),
    /// A nested block, as produced by a list of maps.
    Nested(Detection),
}

/// A named sub-detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub entries: Vec<DetectionEntry>,
}

impl Detection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field match.
    pub fn with_item(mut self, item: DetectionItem) -> Self {
        self.entries.push(DetectionEntry::Item(item));
        self
    }

    /// Add a nested block.
    pub fn with_nested(mut self, detection: Detection) -> Self {
        self.entries.push(DetectionEntry::Nested(detection));
        self
    }

    /// All field matches, depth first in declaration order.
    pub fn items(&self) -> DetectionItems<'_> {
        DetectionItems {
            stack: vec![self.entries.iter()],
        }
    }
}

impl FromIterator<DetectionItem> for Detection {
    fn from_iter<I: IntoIterator<Item = DetectionItem>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(DetectionEntry::Item).collect(),
        }
    }
}

/// Iterator returned by [`Detection::items`].
pub struct DetectionItems<'a> {
    stack: Vec<std::slice::Iter<'a, DetectionEntry>>,
}

impl<'a> Iterator for DetectionItems<'a> {
    type Item = &'a DetectionItem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.stack.last_mut()?.next() {
                Some(entry) => entry,
                None => {
                    self.stack.pop();
                    continue;
                }
            };
            match entry {
                DetectionEntry::Item(item) => return Some(item),
                DetectionEntry::Nested(nested) => self.stack.push(nested.entries.iter()),
            }
        }
    }
}
