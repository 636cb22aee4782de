//! Frontier Companion content pack for a Savage-style rules engine.
//!
//! This crate provides:
//! - Declarative rule tables (races, edges, hindrances, powers, skills, gear)
//! - Table composition: core ∪ additions − removals, as immutable values
//! - Vocabulary translation from the legacy edition's terms to current ones
//! - Typed registration of every entry with a host rules engine
//! - Derived-rule hooks for entries a flat record cannot describe
//!
//! The host engine itself (attribute computation, validation, editors,
//! sheets) lives behind the [`RulesHost`] trait.
//!
//! # Quick Start
//!
//! ```
//! use rules_pack::{PackConfig, Registrar, RuleSet};
//! use rules_pack::testing::RecordingHost;
//!
//! let rule_set = RuleSet::build(&PackConfig::default()).unwrap();
//!
//! let mut host = RecordingHost::new();
//! rule_set.install(&mut host, &Registrar::with_pack_defaults());
//!
//! assert!(host.catalog_names("powers").contains(&"Light/Darkness".to_string()));
//! ```

pub mod choice;
pub mod config;
pub mod data;
pub mod extra;
pub mod host;
pub mod randomize;
pub mod record;
pub mod registrar;
pub mod ruleset;
pub mod table;
pub mod testing;
pub mod translate;

// Primary public API
pub use choice::{Choice, ChoiceType, UnknownChoiceType};
pub use config::{ConfigError, PackConfig};
pub use extra::ExtraRules;
pub use host::{Formula, Operator, RulesHost};
pub use randomize::randomize_one_attribute;
pub use record::Record;
pub use registrar::Registrar;
pub use ruleset::{PackError, PluginRegistry, RuleSet};
pub use table::{Table, TableBuilder};
pub use translate::{TranslateError, Vocabulary};
