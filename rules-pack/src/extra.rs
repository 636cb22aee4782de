//! Derived-rule attachment for edges, hindrances and races.
//!
//! Some effects cannot be read off a record: an edge whose benefit scales
//! with Smarts, a race that adds to the edge-point pool. [`ExtraRules`] maps
//! `(type, name)` to a small closure that wires those formulas into the host.
//! Names without an override fall through to the host's own
//! `*_rules_extra` handler, so base-ruleset entries keep their derived
//! rules.

use crate::choice::ChoiceType;
use crate::host::{Formula, Operator, RulesHost};
use crate::record::Record;
use std::collections::HashMap;
use std::fmt;

/// A derived-rule closure: `(host, name, record)`.
pub type ExtraRuleFn = Box<dyn Fn(&mut dyn RulesHost, &str, &Record) + Send + Sync>;

/// Sparse per-name overrides over the host's default extra-rule handlers.
#[derive(Default)]
pub struct ExtraRules {
    overrides: HashMap<ChoiceType, HashMap<String, ExtraRuleFn>>,
}

impl ExtraRules {
    /// No overrides: every entry goes to the host's default handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// The overrides this pack ships with.
    pub fn pack_defaults() -> Self {
        Self::new()
            .with_override(ChoiceType::Edge, "Brawny", brawny)
            .with_override(ChoiceType::Edge, "Fleet-Footed", fleet_footed)
            .with_override(ChoiceType::Edge, "Linguist", linguist)
            .with_override(ChoiceType::Hindrance, "Elderly", elderly)
            .with_override(ChoiceType::Hindrance, "Small", small)
            .with_override(ChoiceType::Hindrance, "Young", young)
            .with_override(ChoiceType::Race, "Dwarf", dwarf)
            .with_override(ChoiceType::Race, "Half-Folk", half_folk)
            .with_override(ChoiceType::Race, "Human", human)
    }

    /// Add or replace the override for `name`.
    pub fn with_override<F>(mut self, kind: ChoiceType, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&mut dyn RulesHost, &str, &Record) + Send + Sync + 'static,
    {
        self.overrides
            .entry(kind)
            .or_default()
            .insert(name.into(), Box::new(rule));
        self
    }

    pub fn has_override(&self, kind: ChoiceType, name: &str) -> bool {
        self.overrides
            .get(&kind)
            .is_some_and(|by_name| by_name.contains_key(name))
    }

    /// Attach derived rules for one entry.
    ///
    /// Only edges, hindrances and races carry derived rules; other types
    /// are left alone.
    pub fn apply(&self, host: &mut dyn RulesHost, kind: ChoiceType, name: &str, record: &Record) {
        if let Some(rule) = self.overrides.get(&kind).and_then(|by_name| by_name.get(name)) {
            rule(host, name, record);
            return;
        }
        match kind {
            ChoiceType::Edge => host.edge_rules_extra(name, record),
            ChoiceType::Hindrance => host.hindrance_rules_extra(name, record),
            ChoiceType::Race => host.race_rules_extra(name, record),
            _ => {}
        }
    }
}

impl fmt::Debug for ExtraRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self
            .overrides
            .iter()
            .flat_map(|(kind, by_name)| by_name.keys().map(move |name| format!("{kind}:{name}")))
            .collect();
        names.sort();
        f.debug_struct("ExtraRules").field("overrides", &names).finish()
    }
}

fn feature(name: &str) -> String {
    format!("features.{name}")
}

// Edges

fn brawny(host: &mut dyn RulesHost, name: &str, _record: &Record) {
    host.define_rule("toughness", &feature(name), Operator::Add, Formula::Const(1));
    host.define_rule("encumbranceStep", &feature(name), Operator::Add, Formula::Const(1));
}

fn fleet_footed(host: &mut dyn RulesHost, name: &str, _record: &Record) {
    host.define_rule("pace", &feature(name), Operator::Add, Formula::Const(2));
    host.define_rule("runningDieStep", &feature(name), Operator::Add, Formula::Const(1));
}

fn linguist(host: &mut dyn RulesHost, name: &str, _record: &Record) {
    host.define_rule(
        "skillNotes.linguist",
        &feature(name),
        Operator::Set,
        Formula::expr("smarts / 2"),
    );
    host.define_rule(
        "languageCount",
        "skillNotes.linguist",
        Operator::Add,
        Formula::Source,
    );
}

// Hindrances

fn elderly(host: &mut dyn RulesHost, name: &str, _record: &Record) {
    host.define_rule("pace", &feature(name), Operator::Add, Formula::Const(-1));
    host.define_rule("skillPoints", &feature(name), Operator::Add, Formula::Const(5));
}

fn small(host: &mut dyn RulesHost, name: &str, _record: &Record) {
    host.define_rule("toughness", &feature(name), Operator::Add, Formula::Const(-1));
}

fn young(host: &mut dyn RulesHost, name: &str, record: &Record) {
    let penalty = match record.text("Severity").as_deref() {
        Some("Major") => -2,
        _ => -1,
    };
    host.define_rule(
        "attributePoints",
        &feature(name),
        Operator::Add,
        Formula::Const(penalty),
    );
    host.define_rule("benniesMax", &feature(name), Operator::Add, Formula::Const(1));
}

// Races

fn dwarf(host: &mut dyn RulesHost, _name: &str, _record: &Record) {
    host.define_rule("pace", "features.Reduced Pace", Operator::Add, Formula::Const(-1));
    host.define_rule("toughness", "features.Tough", Operator::Add, Formula::Const(1));
}

fn half_folk(host: &mut dyn RulesHost, _name: &str, _record: &Record) {
    host.define_rule("toughness", "features.Short", Operator::Add, Formula::Const(-1));
    host.define_rule("benniesMax", "features.Luck", Operator::Add, Formula::Const(1));
}

fn human(host: &mut dyn RulesHost, _name: &str, _record: &Record) {
    host.define_rule("edgePoints", "features.Adaptable", Operator::Add, Formula::Const(1));
}
