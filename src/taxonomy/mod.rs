//! MITRE ATT&CK taxonomy data.
//!
//! A [`Taxonomy`] is the catalog the ATT&CK tag validator builds its
//! allow-set from. It is loaded once, from the bundled catalog or from a JSON
//! file with the same shape:
//!
//! ```json
//! {
//!   "tactics": { "TA0011": "command-and-control" },
//!   "techniques": { "T1001.001": "Junk Data" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LintError, Result};

const BUNDLED_ATTACK: &str = include_str!("attack.json");

/// Tactic and technique catalogs keyed by ATT&CK id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Taxonomy {
    /// Tactic id → display name (`TA0011` → `command-and-control`).
    #[serde(default)]
    pub tactics: BTreeMap<String, String>,
    /// Technique id → display name (`T1001.001` → `Junk Data`).
    #[serde(default)]
    pub techniques: BTreeMap<String, String>,
}

impl Taxonomy {
    /// The catalog compiled into the crate.
    ///
    /// Carries every Enterprise tactic, technique and sub-technique.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_ATTACK)
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LintError::Taxonomy {
            message: e.to_string(),
        })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LintError::Taxonomy {
            message: format!("{}: {}", path.display(), e),
        })?;
        let taxonomy = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded taxonomy from {}: {} tactics, {} techniques",
            path.display(),
            taxonomy.tactics.len(),
            taxonomy.techniques.len()
        );
        Ok(taxonomy)
    }

    /// Fail when either catalog is empty.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.tactics.is_empty() {
            return Err(LintError::Taxonomy {
                message: "tactic catalog is empty".into(),
            });
        }
        if self.techniques.is_empty() {
            return Err(LintError::Taxonomy {
                message: "technique catalog is empty".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bundled_catalog_loads() {
        let taxonomy = Taxonomy::bundled().unwrap();
        assert_eq!(taxonomy.tactics.len(), 14);
        assert_eq!(
            taxonomy.tactics.get("TA0011").map(String::as_str),
            Some("command-and-control")
        );
        assert!(taxonomy.techniques.contains_key("T1001.001"));
        assert_eq!(taxonomy.techniques.len(), 637);
        taxonomy.ensure_complete().unwrap();
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let taxonomy = Taxonomy::from_json(r#"{"tactics": {"TA0002": "execution"}}"#).unwrap();
        assert!(taxonomy.techniques.is_empty());
        assert!(taxonomy.ensure_complete().is_err());
    }

    #[test]
    fn empty_tactics_are_rejected() {
        let taxonomy = Taxonomy::default();
        let err = taxonomy.ensure_complete().unwrap_err();
        assert!(err.to_string().contains("tactic"));
    }

    #[test]
    fn malformed_json_is_a_taxonomy_error() {
        let err = Taxonomy::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LintError::Taxonomy { .. }));
    }

    #[test]
    fn loads_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("attack.json");
        fs::write(
            &path,
            r#"{"tactics": {"TA0040": "impact"}, "techniques": {"T1486": "Data Encrypted for Impact"}}"#,
        )
        .unwrap();

        let taxonomy = Taxonomy::load(&path).unwrap();
        assert_eq!(taxonomy.tactics.len(), 1);
        assert_eq!(taxonomy.techniques.len(), 1);
    }

    #[test]
    fn missing_file_is_a_taxonomy_error() {
        let err = Taxonomy::load(Path::new("/nonexistent/attack.json")).unwrap_err();
        assert!(matches!(err, LintError::Taxonomy { .. }));
    }
}
