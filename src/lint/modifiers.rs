//! Modifier sequence analysis.
//!
//! A modifier list is read two ways: as a multiset ("is `all` present", "is
//! anything repeated") and as a sequence ("does a containment modifier come
//! after `base64offset`"). [`ModifierSequence`] derives the multiset once and
//! keeps the ordered slice alongside it.

use std::collections::{BTreeMap, BTreeSet};

use crate::rule::{DetectionItem, Modifier};

/// An ordered modifier list with its derived counts.
#[derive(Debug, Clone)]
pub struct ModifierSequence<'a> {
    modifiers: &'a [Modifier],
    counts: BTreeMap<Modifier, usize>,
}

impl<'a> ModifierSequence<'a> {
    pub fn new(modifiers: &'a [Modifier]) -> Self {
        let mut counts = BTreeMap::new();
        for modifier in modifiers {
            *counts.entry(*modifier).or_insert(0) += 1;
        }
        Self { modifiers, counts }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.counts.contains_key(&modifier)
    }

    pub fn count(&self, modifier: Modifier) -> usize {
        self.counts.get(&modifier).copied().unwrap_or(0)
    }

    /// A containment modifier anywhere in the sequence.
    pub fn has_containment(&self) -> bool {
        self.counts.keys().any(Modifier::is_containment)
    }

    /// A containment modifier somewhere after the first `modifier`.
    ///
    /// False when `modifier` is absent.
    pub fn containment_after(&self, modifier: Modifier) -> bool {
        match self.modifiers.iter().position(|m| *m == modifier) {
            Some(pos) => self.modifiers[pos + 1..].iter().any(Modifier::is_containment),
            None => false,
        }
    }

    /// Apply-once modifiers that occur more than once.
    pub fn repeated(&self) -> BTreeSet<Modifier> {
        self.counts
            .iter()
            .filter(|(modifier, count)| **count > 1 && modifier.applies_once())
            .map(|(modifier, _)| *modifier)
            .collect()
    }
}

/// One defect in a modifier sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierFinding {
    /// `all` on a bound field with no containment modifier.
    AllWithoutContainment,
    /// `base64offset` with no containment modifier after it.
    Base64OffsetWithoutContainment,
    /// Apply-once modifiers used more than once.
    AppliedMultiple(BTreeSet<Modifier>),
}

/// Analyse the modifiers of one field match.
pub fn analyze(item: &DetectionItem) -> Vec<ModifierFinding> {
    let sequence = ModifierSequence::new(&item.modifiers);
    let mut findings = Vec::new();

    if !item.is_unbound() && sequence.contains(Modifier::All) && !sequence.has_containment() {
        findings.push(ModifierFinding::AllWithoutContainment);
    }

    if sequence.contains(Modifier::Base64Offset)
        && !sequence.containment_after(Modifier::Base64Offset)
    {
        findings.push(ModifierFinding::Base64OffsetWithoutContainment);
    }

    let repeated = sequence.repeated();
    if !repeated.is_empty() {
        findings.push(ModifierFinding::AppliedMultiple(repeated));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use Modifier::*;

    fn field(modifiers: Vec<Modifier>) -> DetectionItem {
        DetectionItem::new("field", modifiers, vec!["value".into()])
    }

    #[test]
    fn counts_are_derived_once() {
        let mods = [Base64Offset, Base64Offset, Contains];
        let sequence = ModifierSequence::new(&mods);
        assert_eq!(sequence.count(Base64Offset), 2);
        assert_eq!(sequence.count(Contains), 1);
        assert_eq!(sequence.count(All), 0);
    }

    #[test]
    fn containment_after_is_positional() {
        let after = [Base64Offset, Contains];
        assert!(ModifierSequence::new(&after).containment_after(Base64Offset));

        let before = [Contains, Base64Offset];
        assert!(!ModifierSequence::new(&before).containment_after(Base64Offset));

        let absent = [Contains];
        assert!(!ModifierSequence::new(&absent).containment_after(Base64Offset));
    }

    #[test]
    fn all_without_contains() {
        assert_eq!(analyze(&field(vec![All])), vec![ModifierFinding::AllWithoutContainment]);
        assert!(analyze(&field(vec![Contains, All])).is_empty());
        assert!(analyze(&field(vec![StartsWith, All])).is_empty());
    }

    #[test]
    fn unbound_all_is_exempt() {
        let item = DetectionItem::unbound(vec![All], vec!["a".into(), "b".into()]);
        assert!(analyze(&item).is_empty());
    }

    #[test]
    fn base64offset_needs_following_containment() {
        assert_eq!(
            analyze(&field(vec![Base64Offset])),
            vec![ModifierFinding::Base64OffsetWithoutContainment]
        );
        assert!(analyze(&field(vec![Base64Offset, Contains])).is_empty());
        assert!(analyze(&field(vec![Base64Offset, EndsWith])).is_empty());
    }

    #[test]
    fn repeated_modifiers_are_reported_as_a_set() {
        let findings = analyze(&field(vec![
            Base64Offset,
            Base64Offset,
            Base64Offset,
            Contains,
            Contains,
        ]));
        assert_eq!(
            findings,
            vec![ModifierFinding::AppliedMultiple(BTreeSet::from([
                Contains,
                Base64Offset
            ]))]
        );
    }

    #[test]
    fn repeated_base64_is_allowed() {
        assert!(analyze(&field(vec![Base64, Base64])).is_empty());
    }

    #[test]
    fn repeated_encoding_and_comparison_modifiers() {
        for modifier in [Wide, Utf16le, Windash, Expand, Gt, FieldRef] {
            assert_eq!(
                analyze(&field(vec![modifier, modifier])),
                vec![ModifierFinding::AppliedMultiple(BTreeSet::from([modifier]))]
            );
        }
    }

    #[test]
    fn several_findings_on_one_item() {
        let findings = analyze(&field(vec![All, All, Base64Offset]));
        assert_eq!(findings.len(), 3);
    }
}
