//! Choice registration: parse one entry and hand it to the host.
//!
//! For each entry the registrar:
//! 1. parses the record into the typed [`Choice`] for its type and makes
//!    the matching `*_rules` call;
//! 2. for edges, hindrances and races, attaches derived rules through
//!    [`ExtraRules`];
//! 3. lists the entry in the host's choice catalog (features excepted).

use crate::choice::{Choice, ChoiceType};
use crate::extra::ExtraRules;
use crate::host::RulesHost;
use crate::record::Record;
use crate::table::Table;
use tracing::{debug, warn};

/// Registers choices with a host.
#[derive(Debug, Default)]
pub struct Registrar {
    extras: ExtraRules,
}

impl Registrar {
    /// A registrar with the given derived-rule overrides.
    pub fn new(extras: ExtraRules) -> Self {
        Self { extras }
    }

    /// A registrar carrying this pack's derived-rule overrides.
    pub fn with_pack_defaults() -> Self {
        Self::new(ExtraRules::pack_defaults())
    }

    pub fn extras(&self) -> &ExtraRules {
        &self.extras
    }

    /// Register one entry given its type tag as text.
    ///
    /// An unknown tag is logged as a warning and the entry is dropped; no
    /// host call is made.
    pub fn register(&self, host: &mut dyn RulesHost, type_tag: &str, name: &str, record: &str) {
        match type_tag.parse::<ChoiceType>() {
            Ok(kind) => self.register_choice(host, kind, name, record),
            Err(err) => warn!(%err, name, "dropping choice of unknown type"),
        }
    }

    /// Register one entry of a known type.
    pub fn register_choice(
        &self,
        host: &mut dyn RulesHost,
        kind: ChoiceType,
        name: &str,
        record: &str,
    ) {
        let parsed = Record::parse(record);
        debug!(%kind, name, "registering choice");

        match Choice::parse(kind, &parsed) {
            Choice::Arcana(arcana) => host.arcana_rules(name, &arcana),
            Choice::Armor(armor) => host.armor_rules(name, &armor),
            Choice::Concept(concept) => host.concept_rules(name, &concept),
            Choice::Deity(deity) => host.deity_rules(name, &deity),
            Choice::Edge(edge) => host.edge_rules(name, &edge),
            Choice::Feature(feature) => host.feature_rules(name, &feature),
            Choice::Goody(goody) => host.goody_rules(name, &goody),
            Choice::Hindrance(hindrance) => host.hindrance_rules(name, &hindrance),
            Choice::Language(language) => host.language_rules(name, &language),
            Choice::Power(power) => host.power_rules(name, &power),
            Choice::Race(race) => host.race_rules(name, &race),
            Choice::Shield(shield) => host.shield_rules(name, &shield),
            Choice::Skill(skill) => host.skill_rules(name, &skill),
            Choice::Weapon(weapon) => host.weapon_rules(name, &weapon),
        }

        if kind.has_extra_rules() {
            self.extras.apply(host, kind, name, &parsed);
        }

        if let Some(group) = kind.catalog_group() {
            host.add_choice(group, name, record);
        }
    }

    /// Announce a whole table to the host, then register its entries in
    /// order.
    pub fn register_table(&self, host: &mut dyn RulesHost, kind: ChoiceType, table: &Table) {
        host.define_choice(kind.table_name(), table);
        for (name, record) in table.iter() {
            self.register_choice(host, kind, name, record);
        }
    }
}
