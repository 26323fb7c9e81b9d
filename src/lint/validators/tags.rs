//! Tag namespace checks.
//!
//! Both checks are allow-set lookups gated on the tag namespace. The ATT&CK
//! set is computed once from a [`Taxonomy`]; the TLP sets are fixed.

use std::collections::HashSet;

use crate::error::Result;
use crate::lint::{Issue, IssueKind, IssuePayload, RuleCheck, ValidatorId};
use crate::rule::{RuleTag, SigmaRule};
use crate::taxonomy::Taxonomy;

const TLP_V1: &[&str] = &["white", "green", "amber", "red"];
const TLP_V2: &[&str] = &["clear", "green", "amber", "amber+strict", "red"];

/// Issues for every tag in `namespace` whose name is not in `allowed`, in tag order.
fn disallowed_tags(
    rule: &SigmaRule,
    namespace: &str,
    allowed: &HashSet<String>,
    kind: IssueKind,
) -> Vec<Issue> {
    rule.tags
        .iter()
        .filter(|tag| tag.namespace == namespace && !allowed.contains(&tag.name))
        .map(|tag| Issue::for_rule(kind, rule, IssuePayload::Tag { tag: tag.clone() }))
        .collect()
}

/// Flags `attack.*` tags that name neither a tactic nor a technique.
#[derive(Debug, Clone)]
pub struct AttackTagValidator {
    allowed: HashSet<String>,
}

impl AttackTagValidator {
    /// Build the allow-set from `taxonomy`.
    ///
    /// Fails when either catalog is empty rather than rejecting every tag.
    pub fn new(taxonomy: &Taxonomy) -> Result<Self> {
        taxonomy.ensure_complete()?;

        let tactics = taxonomy
            .tactics
            .values()
            .map(|name| name.to_lowercase().replace(['-', ' '], "_"));
        let techniques = taxonomy.techniques.keys().map(|id| id.to_lowercase());
        let allowed: HashSet<String> = tactics.chain(techniques).collect();

        tracing::debug!("ATT&CK allow-set built with {} entries", allowed.len());
        Ok(Self { allowed })
    }

    pub fn allows(&self, tag: &RuleTag) -> bool {
        tag.namespace != "attack" || self.allowed.contains(&tag.name)
    }
}

impl RuleCheck for AttackTagValidator {
    fn id(&self) -> ValidatorId {
        ValidatorId::new("attack_tag")
    }

    fn description(&self) -> &str {
        "Checks attack.* tags against the MITRE ATT&CK taxonomy"
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        disallowed_tags(rule, "attack", &self.allowed, IssueKind::InvalidAttackTag)
    }
}

/// Which TLP vocabulary a rule set follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlpStandard {
    /// TLP 1.0: white, green, amber, red.
    V1,
    /// TLP 2.0: clear, green, amber, amber+strict, red.
    V2,
    /// Either version, for corpora that mix them.
    Any,
}

impl TlpStandard {
    fn labels(&self) -> HashSet<String> {
        let labels: Box<dyn Iterator<Item = &&str>> = match self {
            TlpStandard::V1 => Box::new(TLP_V1.iter()),
            TlpStandard::V2 => Box::new(TLP_V2.iter()),
            TlpStandard::Any => Box::new(TLP_V1.iter().chain(TLP_V2)),
        };
        labels.map(|label| label.to_string()).collect()
    }
}

/// Flags `tlp.*` tags outside the chosen TLP vocabulary.
#[derive(Debug, Clone)]
pub struct TlpTagValidator {
    standard: TlpStandard,
    allowed: HashSet<String>,
}

impl TlpTagValidator {
    pub fn new(standard: TlpStandard) -> Self {
        Self {
            standard,
            allowed: standard.labels(),
        }
    }

    pub fn standard(&self) -> TlpStandard {
        self.standard
    }
}

impl RuleCheck for TlpTagValidator {
    fn id(&self) -> ValidatorId {
        match self.standard {
            TlpStandard::V1 => ValidatorId::new("tlpv1_tag"),
            TlpStandard::V2 => ValidatorId::new("tlpv2_tag"),
            TlpStandard::Any => ValidatorId::new("tlp_tag"),
        }
    }

    fn description(&self) -> &str {
        match self.standard {
            TlpStandard::V1 => "Checks tlp.* tags against TLP 1.0",
            TlpStandard::V2 => "Checks tlp.* tags against TLP 2.0",
            TlpStandard::Any => "Checks tlp.* tags against any TLP version",
        }
    }

    fn check(&self, rule: &SigmaRule) -> Vec<Issue> {
        disallowed_tags(rule, "tlp", &self.allowed, IssueKind::InvalidTlpTag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_with_tags(tags: &[&str]) -> SigmaRule {
        tags.iter().fold(SigmaRule::new("Test"), |rule, tag| {
            rule.with_tag(tag.parse().unwrap())
        })
    }

    fn tag_issues(issues: Vec<Issue>) -> Vec<String> {
        issues
            .into_iter()
            .map(|issue| match issue.payload {
                IssuePayload::Tag { tag } => tag.to_string(),
                other => panic!("unexpected payload: {:?}", other),
            })
            .collect()
    }

    fn attack_validator() -> AttackTagValidator {
        AttackTagValidator::new(&Taxonomy::bundled().unwrap()).unwrap()
    }

    #[test]
    fn invalid_attack_tags_in_order() {
        let rule = rule_with_tags(&["attack.test1", "attack.test2"]);
        let issues = attack_validator().check(&rule);

        assert_eq!(
            issues,
            vec![
                Issue::for_rule(
                    IssueKind::InvalidAttackTag,
                    &rule,
                    IssuePayload::Tag {
                        tag: RuleTag::new("attack", "test1")
                    }
                ),
                Issue::for_rule(
                    IssueKind::InvalidAttackTag,
                    &rule,
                    IssuePayload::Tag {
                        tag: RuleTag::new("attack", "test2")
                    }
                ),
            ]
        );
    }

    #[test]
    fn valid_attack_tags() {
        let rule = rule_with_tags(&["attack.command_and_control", "attack.t1001.001"]);
        assert!(attack_validator().check(&rule).is_empty());
    }

    #[test]
    fn sub_techniques_across_tactics_are_known() {
        let rule = rule_with_tags(&[
            "attack.t1134.001",
            "attack.t1055.001",
            "attack.t1003.004",
            "attack.t1560",
        ]);
        assert!(attack_validator().check(&rule).is_empty());
    }

    #[test]
    fn other_namespaces_are_ignored() {
        let rule = rule_with_tags(&["car.2016-04-005", "cve.2021-44228"]);
        assert!(attack_validator().check(&rule).is_empty());
    }

    #[test]
    fn tactic_names_with_spaces_are_normalized() {
        let taxonomy = Taxonomy::from_json(
            r#"{"tactics": {"TA0005": "Defense Evasion"}, "techniques": {"T1027": "Obfuscated Files or Information"}}"#,
        )
        .unwrap();
        let validator = AttackTagValidator::new(&taxonomy).unwrap();

        assert!(validator.allows(&RuleTag::new("attack", "defense_evasion")));
        assert!(validator.allows(&RuleTag::new("attack", "t1027")));
        assert!(!validator.allows(&RuleTag::new("attack", "T1027")));
    }

    #[test]
    fn empty_taxonomy_aborts_construction() {
        assert!(AttackTagValidator::new(&Taxonomy::default()).is_err());
    }

    #[test]
    fn tlp_v1_flags_clear() {
        let rule = rule_with_tags(&["tlp.clear", "tlp.white"]);
        let issues = TlpTagValidator::new(TlpStandard::V1).check(&rule);
        assert_eq!(tag_issues(issues), vec!["tlp.clear"]);
    }

    #[test]
    fn tlp_v2_flags_white() {
        let rule = rule_with_tags(&["tlp.clear", "tlp.white"]);
        let issues = TlpTagValidator::new(TlpStandard::V2).check(&rule);
        assert_eq!(tag_issues(issues), vec!["tlp.white"]);
    }

    #[test]
    fn tlp_any_accepts_both_versions() {
        let rule = rule_with_tags(&["tlp.clear", "tlp.white", "tlp.amber+strict"]);
        assert!(TlpTagValidator::new(TlpStandard::Any).check(&rule).is_empty());
    }

    #[test]
    fn tlp_any_flags_unknown_label() {
        let rule = rule_with_tags(&["tlp.clear", "tlp.white", "tlp.test"]);
        let issues = TlpTagValidator::new(TlpStandard::Any).check(&rule);
        assert_eq!(tag_issues(issues), vec!["tlp.test"]);
    }

    #[test]
    fn tlp_ids_per_standard() {
        assert_eq!(RuleCheck::id(&TlpTagValidator::new(TlpStandard::V1)).as_str(), "tlpv1_tag");
        assert_eq!(RuleCheck::id(&TlpTagValidator::new(TlpStandard::V2)).as_str(), "tlpv2_tag");
        assert_eq!(RuleCheck::id(&TlpTagValidator::new(TlpStandard::Any)).as_str(), "tlp_tag");
    }
}
