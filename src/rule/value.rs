//! Literal values of field matches.
//!
//! A [`SigmaString`] keeps wildcards apart from plain text so that checks can
//! tell an escaped `\*` from a real glob.

use std::fmt;

use serde::{Serialize, Serializer};

/// One piece of a [`SigmaString`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringPart {
    /// Literal text.
    Plain(String),
    /// `*`, matches any run of characters.
    WildcardMulti,
    /// `?`, matches exactly one character.
    WildcardSingle,
}

/// A Sigma string value made of plain text and wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SigmaString {
    parts: Vec<StringPart>,
}

impl SigmaString {
    /// Build from Sigma text, honouring `\*`, `\?` and `\\` escapes.
    ///
    /// A backslash before any other character is kept literally.
    pub fn new(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut plain = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.peek() {
                    Some(&next @ ('*' | '?' | '\\')) => {
                        plain.push(next);
                        chars.next();
                    }
                    _ => plain.push('\\'),
                },
                '*' | '?' => {
                    if !plain.is_empty() {
                        parts.push(StringPart::Plain(std::mem::take(&mut plain)));
                    }
                    parts.push(if c == '*' {
                        StringPart::WildcardMulti
                    } else {
                        StringPart::WildcardSingle
                    });
                }
                _ => plain.push(c),
            }
        }
        if !plain.is_empty() {
            parts.push(StringPart::Plain(plain));
        }

        Self { parts }
    }

    /// The parts of this string in order.
    pub fn parts(&self) -> &[StringPart] {
        &self.parts
    }

    /// The literal text if the string has no wildcards.
    pub fn as_plain(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [] => Some(""),
            [StringPart::Plain(s)] => Some(s),
            _ => None,
        }
    }

    /// Iterate the literal text pieces, skipping wildcards.
    pub fn plain_parts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            StringPart::Plain(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// True when two `*` wildcards follow each other with nothing in between.
    pub fn has_adjacent_wildcards(&self) -> bool {
        self.parts.windows(2).any(|pair| {
            matches!(
                pair,
                [StringPart::WildcardMulti, StringPart::WildcardMulti]
            )
        })
    }

}

impl fmt::Display for SigmaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                StringPart::Plain(s) => {
                    for c in s.chars() {
                        if matches!(c, '*' | '?' | '\\') {
                            write!(f, "\\")?;
                        }
                        write!(f, "{}", c)?;
                    }
                }
                StringPart::WildcardMulti => write!(f, "*")?,
                StringPart::WildcardSingle => write!(f, "?")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for SigmaString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl Serialize for SigmaString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A literal value in a field match.
///
/// Quoted YAML scalars become [`RuleValue::String`] even when they look
/// numeric; unquoted numbers become [`RuleValue::Number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RuleValue {
    String(SigmaString),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

impl RuleValue {
    /// The string value, if this is one.
    pub fn as_sigma_string(&self) -> Option<&SigmaString> {
        match self {
            RuleValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::String(s) => write!(f, "{}", s),
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Bool(b) => write!(f, "{}", b),
            RuleValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for RuleValue {
    fn from(text: &str) -> Self {
        RuleValue::String(SigmaString::new(text))
    }
}

impl From<i64> for RuleValue {
    fn from(n: i64) -> Self {
        RuleValue::Number(n.into())
    }
}

impl From<bool> for RuleValue {
    fn from(b: bool) -> Self {
        RuleValue::Bool(b)
    }
}
