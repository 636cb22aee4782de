//! Testing utilities for the rules pack.
//!
//! This module provides a `RecordingHost`: a [`RulesHost`] that performs no
//! rule computation and instead records every call made into it, in order.
//! It keeps a real choice catalog so code that reads registered choices
//! back (such as randomization) behaves as it would against a full host.

use crate::choice::{
    ArcanaChoice, ArmorChoice, Choice, ChoiceType, ConceptChoice, DeityChoice, EdgeChoice,
    FeatureChoice, GoodyChoice, HindranceChoice, LanguageChoice, PowerChoice, RaceChoice,
    ShieldChoice, SkillChoice, WeaponChoice,
};
use crate::host::{Formula, Operator, RulesHost};
use crate::record::Record;
use crate::table::Table;
use indexmap::IndexMap;

/// One call made into a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    DefineChoice {
        group: String,
        names: Vec<String>,
    },
    DefineRule {
        target: String,
        source: String,
        operator: Operator,
        formula: Formula,
    },
    AddChoice {
        group: String,
        name: String,
        record: String,
    },
    /// A typed `*_rules` registration.
    Rules { name: String, choice: Choice },
    /// A host default `*_rules_extra` handler.
    RulesExtra { kind: ChoiceType, name: String },
}

impl HostCall {
    /// Whether this is a typed `*_rules` registration.
    pub fn is_rules(&self) -> bool {
        matches!(self, HostCall::Rules { .. })
    }

    /// Whether this call belongs to derived-rule attachment.
    pub fn is_extra(&self) -> bool {
        matches!(self, HostCall::RulesExtra { .. } | HostCall::DefineRule { .. })
    }
}

/// A host that records calls instead of computing rules.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// Every call made, in order.
    calls: Vec<HostCall>,
    /// Choices listed with `add_choice`, by catalog group.
    catalog: IndexMap<String, Table>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain the call log, keeping the catalog.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Typed registrations, in order.
    pub fn registrations(&self) -> Vec<&HostCall> {
        self.calls.iter().filter(|c| c.is_rules()).collect()
    }

    /// The typed choice registered under `name`, if any.
    pub fn registered(&self, name: &str) -> Option<&Choice> {
        self.calls.iter().find_map(|call| match call {
            HostCall::Rules { name: n, choice } if n == name => Some(choice),
            _ => None,
        })
    }

    /// Formula bindings as `(target, source, operator, formula)`.
    pub fn bindings(&self) -> Vec<(&str, &str, Operator, &Formula)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::DefineRule {
                    target,
                    source,
                    operator,
                    formula,
                } => Some((target.as_str(), source.as_str(), *operator, formula)),
                _ => None,
            })
            .collect()
    }

    /// Names listed under a catalog group.
    pub fn catalog_names(&self, group: &str) -> Vec<String> {
        self.catalog
            .get(group)
            .map(|table| table.names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn record_rules(&mut self, name: &str, choice: Choice) {
        self.calls.push(HostCall::Rules {
            name: name.to_string(),
            choice,
        });
    }

    fn record_extra(&mut self, kind: ChoiceType, name: &str) {
        self.calls.push(HostCall::RulesExtra {
            kind,
            name: name.to_string(),
        });
    }
}

impl RulesHost for RecordingHost {
    fn define_choice(&mut self, group: &str, table: &Table) {
        self.calls.push(HostCall::DefineChoice {
            group: group.to_string(),
            names: table.names().map(str::to_string).collect(),
        });
    }

    fn define_rule(&mut self, target: &str, source: &str, operator: Operator, formula: Formula) {
        self.calls.push(HostCall::DefineRule {
            target: target.to_string(),
            source: source.to_string(),
            operator,
            formula,
        });
    }

    fn add_choice(&mut self, group: &str, name: &str, record: &str) {
        self.calls.push(HostCall::AddChoice {
            group: group.to_string(),
            name: name.to_string(),
            record: record.to_string(),
        });
        let listed = self.catalog.entry(group.to_string()).or_default();
        *listed = listed.merged(&Table::from_entries([(name, record)]));
    }

    fn choices(&self, group: &str) -> Option<&Table> {
        self.catalog.get(group)
    }

    fn arcana_rules(&mut self, name: &str, arcana: &ArcanaChoice) {
        self.record_rules(name, Choice::Arcana(arcana.clone()));
    }

    fn armor_rules(&mut self, name: &str, armor: &ArmorChoice) {
        self.record_rules(name, Choice::Armor(armor.clone()));
    }

    fn concept_rules(&mut self, name: &str, concept: &ConceptChoice) {
        self.record_rules(name, Choice::Concept(concept.clone()));
    }

    fn deity_rules(&mut self, name: &str, deity: &DeityChoice) {
        self.record_rules(name, Choice::Deity(deity.clone()));
    }

    fn edge_rules(&mut self, name: &str, edge: &EdgeChoice) {
        self.record_rules(name, Choice::Edge(edge.clone()));
    }

    fn feature_rules(&mut self, name: &str, feature: &FeatureChoice) {
        self.record_rules(name, Choice::Feature(feature.clone()));
    }

    fn goody_rules(&mut self, name: &str, goody: &GoodyChoice) {
        self.record_rules(name, Choice::Goody(goody.clone()));
    }

    fn hindrance_rules(&mut self, name: &str, hindrance: &HindranceChoice) {
        self.record_rules(name, Choice::Hindrance(hindrance.clone()));
    }

    fn language_rules(&mut self, name: &str, language: &LanguageChoice) {
        self.record_rules(name, Choice::Language(language.clone()));
    }

    fn power_rules(&mut self, name: &str, power: &PowerChoice) {
        self.record_rules(name, Choice::Power(power.clone()));
    }

    fn race_rules(&mut self, name: &str, race: &RaceChoice) {
        self.record_rules(name, Choice::Race(race.clone()));
    }

    fn shield_rules(&mut self, name: &str, shield: &ShieldChoice) {
        self.record_rules(name, Choice::Shield(shield.clone()));
    }

    fn skill_rules(&mut self, name: &str, skill: &SkillChoice) {
        self.record_rules(name, Choice::Skill(skill.clone()));
    }

    fn weapon_rules(&mut self, name: &str, weapon: &WeaponChoice) {
        self.record_rules(name, Choice::Weapon(weapon.clone()));
    }

    fn edge_rules_extra(&mut self, name: &str, _record: &Record) {
        self.record_extra(ChoiceType::Edge, name);
    }

    fn hindrance_rules_extra(&mut self, name: &str, _record: &Record) {
        self.record_extra(ChoiceType::Hindrance, name);
    }

    fn race_rules_extra(&mut self, name: &str, _record: &Record) {
        self.record_extra(ChoiceType::Race, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_accumulates_in_order() {
        let mut host = RecordingHost::new();
        host.add_choice("races", "Dwarf", "Features=Tough");
        host.add_choice("races", "Elf", "Features=Agile");
        host.add_choice("races", "Dwarf", "Features=Tough,Reduced_Pace");

        assert_eq!(host.catalog_names("races"), vec!["Dwarf", "Elf"]);
        assert_eq!(
            host.choices("races").and_then(|t| t.get("Dwarf")),
            Some("Features=Tough,Reduced_Pace")
        );
        assert!(host.choices("edges").is_none());
        assert_eq!(host.calls().len(), 3);
    }

    #[test]
    fn test_take_calls_keeps_catalog() {
        let mut host = RecordingHost::new();
        host.add_choice("skills", "Athletics", "Attribute=agility");
        host.define_rule("pace", "features.Fleet-Footed", Operator::Add, Formula::Const(2));

        let calls = host.take_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].is_extra());
        assert!(host.calls().is_empty());
        assert_eq!(host.catalog_names("skills"), vec!["Athletics"]);
    }
}
