//! Rule-set assembly, installation and the plugin registry.
//!
//! A [`RuleSet`] is the pack's produced artifact: a name, a version and one
//! finished table per choice type. Each table is assembled as an explicit
//! pipeline:
//!
//! ```text
//! core ∪ pack additions ∪ translate(legacy additions) − pack removals
//!      → config vocabulary − config exclusions
//! ```
//!
//! Once built, a rule set is read-only. [`RuleSet::install`] registers it
//! with a host; [`PluginRegistry`] keeps built rule sets by name for the
//! layer that offers them to users.

use crate::choice::ChoiceType;
use crate::config::{ConfigError, PackConfig};
use crate::data;
use crate::host::RulesHost;
use crate::registrar::Registrar;
use crate::table::{Table, TableBuilder};
use crate::translate::{TranslateError, Vocabulary};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors from building or loading a rule set.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current snapshot format version.
const FORMAT_VERSION: u32 = 1;

/// The order tables are installed in. Features come first so that races
/// and edges naming them find them defined; catalogs a later table refers
/// to (skills, powers) precede it.
pub const INSTALL_ORDER: &[ChoiceType] = &[
    ChoiceType::Feature,
    ChoiceType::Skill,
    ChoiceType::Arcana,
    ChoiceType::Power,
    ChoiceType::Edge,
    ChoiceType::Hindrance,
    ChoiceType::Race,
    ChoiceType::Language,
    ChoiceType::Armor,
    ChoiceType::Shield,
    ChoiceType::Weapon,
    ChoiceType::Concept,
    ChoiceType::Deity,
    ChoiceType::Goody,
];

/// A finished, named rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    pub version: String,
    tables: IndexMap<ChoiceType, Table>,
}

/// Versioned JSON wrapper around a rule set.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    format_version: u32,
    rule_set: RuleSet,
}

impl RuleSet {
    /// Assemble every table from the pack data according to `config`.
    pub fn build(config: &PackConfig) -> Result<Self, PackError> {
        let vocabulary = Vocabulary::new(
            config
                .vocabulary
                .iter()
                .map(|(pattern, replacement)| (pattern.as_str(), replacement.as_str())),
        )?;

        let mut tables = IndexMap::with_capacity(INSTALL_ORDER.len());
        for &kind in INSTALL_ORDER {
            let mut builder =
                TableBuilder::new(data::base_table(kind)).add(&data::pack_additions(kind));
            if config.translate_legacy {
                builder = builder
                    .add_translated(&data::legacy_additions(kind), data::legacy_vocabulary());
            }
            let table = builder
                .remove(data::pack_removals(kind))
                .translate(&vocabulary)
                .remove(config.excluded(kind))
                .build();
            tables.insert(kind, table);
        }

        let rule_set = Self {
            name: config.name.clone(),
            version: config.version.clone(),
            tables,
        };
        info!(
            name = %rule_set.name,
            version = %rule_set.version,
            entries = rule_set.entry_count(),
            "built rule set"
        );
        Ok(rule_set)
    }

    /// A rule set from finished tables.
    pub fn from_tables(
        name: impl Into<String>,
        version: impl Into<String>,
        tables: impl IntoIterator<Item = (ChoiceType, Table)>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tables: tables.into_iter().collect(),
        }
    }

    /// The table for `kind`, if the rule set has one.
    pub fn table(&self, kind: ChoiceType) -> Option<&Table> {
        self.tables.get(&kind)
    }

    pub fn tables(&self) -> impl Iterator<Item = (ChoiceType, &Table)> {
        self.tables.iter().map(|(kind, table)| (*kind, table))
    }

    /// Total entries across all tables.
    pub fn entry_count(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }

    /// Register every table with `host`, in [`INSTALL_ORDER`].
    ///
    /// Tables of types missing from the install order (none, for rule sets
    /// built here) follow in their own order.
    pub fn install(&self, host: &mut dyn RulesHost, registrar: &Registrar) {
        let ordered = INSTALL_ORDER
            .iter()
            .filter_map(|kind| self.tables.get_key_value(kind))
            .chain(
                self.tables
                    .iter()
                    .filter(|(kind, _)| !INSTALL_ORDER.contains(*kind)),
            );
        for (kind, table) in ordered {
            registrar.register_table(host, *kind, table);
        }
        info!(name = %self.name, entries = self.entry_count(), "installed rule set");
    }

    /// Serialize to versioned JSON.
    pub fn to_json(&self) -> Result<String, PackError> {
        let snapshot = Snapshot {
            format_version: FORMAT_VERSION,
            rule_set: self.clone(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Load from versioned JSON.
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.format_version != FORMAT_VERSION {
            return Err(PackError::VersionMismatch {
                expected: FORMAT_VERSION,
                found: snapshot.format_version,
            });
        }
        Ok(snapshot.rule_set)
    }
}

/// Built rule sets by name.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    rule_sets: IndexMap<String, RuleSet>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule set under its name, returning the one it replaces.
    pub fn register(&mut self, rule_set: RuleSet) -> Option<RuleSet> {
        info!(name = %rule_set.name, version = %rule_set.version, "registered rule set");
        self.rule_sets.insert(rule_set.name.clone(), rule_set)
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.rule_sets.get(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rule_sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHost;

    fn default_set() -> RuleSet {
        RuleSet::build(&PackConfig::default()).unwrap()
    }

    #[test]
    fn test_build_has_every_table() {
        let rule_set = default_set();
        for kind in ChoiceType::all() {
            assert!(rule_set.table(*kind).is_some(), "{kind}");
        }
        assert_eq!(rule_set.name, "Frontier Companion");
    }

    #[test]
    fn test_build_applies_additions_and_removals() {
        let rule_set = default_set();
        let races = rule_set.table(ChoiceType::Race).unwrap();
        assert!(!races.contains("Saurian"));
        assert!(races.contains("Human"));

        let weapons = rule_set.table(ChoiceType::Weapon).unwrap();
        assert!(weapons.contains("Colt Peacemaker"));
        assert!(weapons.contains("Long Sword"));

        let skills = rule_set.table(ChoiceType::Skill).unwrap();
        assert!(!skills.contains("Piloting"));
        assert!(!skills.contains("Psionics"));
    }

    #[test]
    fn test_build_translates_legacy_entries() {
        let rule_set = default_set();

        let edges = rule_set.table(ChoiceType::Edge).unwrap();
        assert_eq!(
            edges.get("Mountain Man"),
            Some(r#"Type=Background Require="skills.Athletics >= 6","skills.Survival >= 6""#)
        );

        let arcanas = rule_set.table(ChoiceType::Arcana).unwrap();
        assert_eq!(
            arcanas.record("Hexslinging").unwrap().list("Powers"),
            vec!["Bolt", "Light/Darkness", "Speed", "Deflection"]
        );

        let hindrances = rule_set.table(ChoiceType::Hindrance).unwrap();
        assert!(!hindrances.contains("Lame"));
        assert_eq!(
            hindrances.record("Slow+").unwrap().text("Note").as_deref(),
            Some("-2 Pace")
        );
    }

    #[test]
    fn test_build_without_legacy() {
        let with = default_set();
        let without =
            RuleSet::build(&PackConfig::default().with_legacy_translation(false)).unwrap();

        let edges = without.table(ChoiceType::Edge).unwrap();
        assert!(!edges.contains("Mountain Man"));
        assert!(edges.contains("Duelist"));
        assert!(without.entry_count() < with.entry_count());
    }

    #[test]
    fn test_config_vocabulary_and_exclusions() {
        let config = PackConfig::default()
            .with_vocabulary_rule("Spellcasting", "Hexslinging")
            .excluding(ChoiceType::Edge, "Berserk")
            .excluding(ChoiceType::Skill, "Hexslinging");
        let rule_set = RuleSet::build(&config).unwrap();

        let arcanas = rule_set.table(ChoiceType::Arcana).unwrap();
        assert_eq!(
            arcanas.record("Magic").unwrap().text("Skill").as_deref(),
            Some("Hexslinging")
        );
        assert!(!rule_set.table(ChoiceType::Edge).unwrap().contains("Berserk"));
        let skills = rule_set.table(ChoiceType::Skill).unwrap();
        assert!(!skills.contains("Spellcasting"));
        assert!(!skills.contains("Hexslinging"));
    }

    #[test]
    fn test_invalid_config_vocabulary() {
        let config = PackConfig::default().with_vocabulary_rule("Knowledge (", "Lore");
        assert!(matches!(
            RuleSet::build(&config),
            Err(PackError::Translate(_))
        ));
    }

    #[test]
    fn test_install_registers_in_order() {
        let rule_set = default_set();
        let mut host = RecordingHost::new();
        rule_set.install(&mut host, &Registrar::with_pack_defaults());

        assert_eq!(host.registrations().len(), rule_set.entry_count());
        assert!(host.catalog_names("races").contains(&"Dwarf".to_string()));
        assert!(host.choices("features").is_none());

        let first = host.registrations()[0].clone();
        assert!(matches!(
            first,
            crate::testing::HostCall::Rules { choice: crate::choice::Choice::Feature(_), .. }
        ));
    }

    #[test]
    fn test_json_snapshot() {
        let rule_set = RuleSet::from_tables(
            "Tiny",
            "0.0.1",
            [(
                ChoiceType::Power,
                Table::from_entries([("Bolt", "PowerPoints=1")]),
            )],
        );
        let json = rule_set.to_json().unwrap();
        assert_eq!(RuleSet::from_json(&json).unwrap(), rule_set);

        let future = json.replace("\"format_version\": 1", "\"format_version\": 9");
        assert!(matches!(
            RuleSet::from_json(&future),
            Err(PackError::VersionMismatch { expected: 1, found: 9 })
        ));
    }

    #[test]
    fn test_registry_replaces_by_name() {
        let mut registry = PluginRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register(default_set()).is_none());
        let replaced = registry.register(
            RuleSet::build(&PackConfig::default().with_version("9.9")).unwrap(),
        );

        assert_eq!(replaced.map(|r| r.version), Some(env!("CARGO_PKG_VERSION").to_string()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Frontier Companion").map(|r| r.version.as_str()), Some("9.9"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Frontier Companion"]);
    }
}
