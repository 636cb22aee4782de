//! The host rules engine contract.
//!
//! The pack never computes attributes, validates characters or renders a
//! sheet. It configures a host through [`RulesHost`]: typed registration
//! per choice type, a generic choice catalog, and formula bindings into the
//! host's dependency-tracked attribute graph.

use crate::choice::{
    ArcanaChoice, ArmorChoice, ConceptChoice, DeityChoice, EdgeChoice, FeatureChoice,
    GoodyChoice, HindranceChoice, LanguageChoice, PowerChoice, RaceChoice, ShieldChoice,
    SkillChoice, WeaponChoice,
};
use crate::record::Record;
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a binding combines its formula into the target attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Add to the target.
    Add,
    /// Overwrite the target.
    Set,
    /// Multiply the target.
    Multiply,
    /// Raise the target to at least the formula value.
    Max,
    /// Lower the target to at most the formula value.
    Min,
}

impl Operator {
    /// The operator as the host's formula graph spells it.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Set => "=",
            Operator::Multiply => "*",
            Operator::Max => "^",
            Operator::Min => "v",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The value a binding contributes when its source attribute is defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// A fixed amount.
    Const(i32),
    /// The source attribute's own value.
    Source,
    /// An expression the host evaluates; `source` names the source value.
    Expr(String),
}

impl Formula {
    pub fn expr(text: impl Into<String>) -> Self {
        Formula::Expr(text.into())
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Const(value) => write!(f, "{value}"),
            Formula::Source => f.write_str("source"),
            Formula::Expr(text) => f.write_str(text),
        }
    }
}

/// Operations the pack calls on the host rules engine.
///
/// The `*_rules` methods receive the typed field set parsed from an entry's
/// record. The `*_rules_extra` methods are the host's own derived-rule
/// handlers, used for entries the pack has no override for.
pub trait RulesHost {
    /// Announce a full table before its entries are registered.
    fn define_choice(&mut self, group: &str, table: &Table);

    /// Bind `formula` from `source` into `target` with `operator`.
    fn define_rule(&mut self, target: &str, source: &str, operator: Operator, formula: Formula);

    /// List `name` in the generic choice catalog under `group`.
    fn add_choice(&mut self, group: &str, name: &str, record: &str);

    /// Everything listed under `group` so far.
    fn choices(&self, group: &str) -> Option<&Table>;

    fn arcana_rules(&mut self, name: &str, arcana: &ArcanaChoice);
    fn armor_rules(&mut self, name: &str, armor: &ArmorChoice);
    fn concept_rules(&mut self, name: &str, concept: &ConceptChoice);
    fn deity_rules(&mut self, name: &str, deity: &DeityChoice);
    fn edge_rules(&mut self, name: &str, edge: &EdgeChoice);
    fn feature_rules(&mut self, name: &str, feature: &FeatureChoice);
    fn goody_rules(&mut self, name: &str, goody: &GoodyChoice);
    fn hindrance_rules(&mut self, name: &str, hindrance: &HindranceChoice);
    fn language_rules(&mut self, name: &str, language: &LanguageChoice);
    fn power_rules(&mut self, name: &str, power: &PowerChoice);
    fn race_rules(&mut self, name: &str, race: &RaceChoice);
    fn shield_rules(&mut self, name: &str, shield: &ShieldChoice);
    fn skill_rules(&mut self, name: &str, skill: &SkillChoice);
    fn weapon_rules(&mut self, name: &str, weapon: &WeaponChoice);

    fn edge_rules_extra(&mut self, name: &str, record: &Record);
    fn hindrance_rules_extra(&mut self, name: &str, record: &Record);
    fn race_rules_extra(&mut self, name: &str, record: &Record);
}
