//! Configuration for assembling the rule set.
//!
//! Built in code with the `with_*` methods or read from JSON:
//!
//! ```
//! use rules_pack::config::PackConfig;
//! use rules_pack::choice::ChoiceType;
//!
//! let config = PackConfig::from_json(r#"{
//!     "name": "Frontier Companion (no saurians)",
//!     "exclude": { "Edge": ["Berserk"] },
//!     "vocabulary": [["Spellcasting", "Hexslinging"]]
//! }"#).unwrap();
//! assert!(config.translate_legacy);
//! assert_eq!(config.excluded(ChoiceType::Edge), ["Berserk".to_string()]);
//! ```

use crate::choice::ChoiceType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rule-set assembly options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Name the rule set registers under.
    pub name: String,

    /// Version string carried by the rule set.
    pub version: String,

    /// Include the pack entries written in the legacy vocabulary,
    /// translated. When false they are left out entirely.
    pub translate_legacy: bool,

    /// Replacement rules applied, in order, to every assembled table.
    pub vocabulary: Vec<(String, String)>,

    /// Entry names dropped from each table after translation.
    pub exclude: IndexMap<ChoiceType, Vec<String>>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            name: "Frontier Companion".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            translate_legacy: true,
            vocabulary: Vec::new(),
            exclude: IndexMap::new(),
        }
    }
}

impl PackConfig {
    /// Create a config with the given rule-set name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read a config from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Include or leave out the legacy-vocabulary entries.
    pub fn with_legacy_translation(mut self, enabled: bool) -> Self {
        self.translate_legacy = enabled;
        self
    }

    /// Append a replacement rule.
    pub fn with_vocabulary_rule(
        mut self,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.vocabulary.push((pattern.into(), replacement.into()));
        self
    }

    /// Drop `name` from the `kind` table.
    pub fn excluding(mut self, kind: ChoiceType, name: impl Into<String>) -> Self {
        self.exclude.entry(kind).or_default().push(name.into());
        self
    }

    /// Names excluded from the `kind` table.
    pub fn excluded(&self, kind: ChoiceType) -> &[String] {
        self.exclude.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }
}
