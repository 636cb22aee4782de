//! Vocabulary translation between rule-set dialects.
//!
//! A [`Vocabulary`] is an ordered list of `pattern -> replacement` rules.
//! Translating a table applies the rules one after another; each rule first
//! relocates an entry whose name is exactly the pattern text, then rewrites
//! every match of the pattern in every record. Later rules see the output of
//! earlier ones, so a list like `Obscure -> Darkness`, `Darkness ->
//! Light/Darkness` renames in two hops.

use crate::table::Table;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// `$$` or a numbered group reference `$N` in a replacement.
static NUMBERED_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$|\d+)").expect("numbered group pattern is valid"));

/// Error type for building a vocabulary.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Invalid replacement pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A single compiled replacement rule.
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: Regex,
    /// As written; also the key an exactly matching entry is moved to.
    replacement: String,
    /// `replacement` with numbered groups braced for `replace_all`.
    expansion: String,
}

impl Replacement {
    /// Compile a rule. The replacement may refer to capture groups as `$1`
    /// or `${name}`. A numbered reference ends at the last digit, so `$1s`
    /// is group 1 followed by `s`.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, TranslateError> {
        let compiled = Regex::new(pattern).map_err(|source| TranslateError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.to_string(),
            expansion: brace_numbered_groups(replacement),
        })
    }

    /// The pattern as written.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Apply this rule to a table: key relocation first, then values.
    pub fn apply(&self, table: &Table) -> Table {
        let table = if table.contains(self.pattern()) {
            table.renamed(self.pattern(), &self.replacement)
        } else {
            table.clone()
        };
        table.map_records(|record| {
            self.pattern
                .replace_all(record, self.expansion.as_str())
                .into_owned()
        })
    }
}

fn brace_numbered_groups(replacement: &str) -> String {
    NUMBERED_GROUP
        .replace_all(replacement, |caps: &Captures| match &caps[1] {
            "$" => "$$".to_string(),
            group => format!("${{{group}}}"),
        })
        .into_owned()
}

/// An ordered list of replacement rules.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    rules: Vec<Replacement>,
}

impl Vocabulary {
    /// Compile `(pattern, replacement)` pairs, keeping their order.
    pub fn new<P, R>(pairs: impl IntoIterator<Item = (P, R)>) -> Result<Self, TranslateError>
    where
        P: AsRef<str>,
        R: AsRef<str>,
    {
        Self::default().extend(pairs)
    }

    /// This vocabulary with further rules appended after the existing ones.
    pub fn extend<P, R>(mut self, pairs: impl IntoIterator<Item = (P, R)>) -> Result<Self, TranslateError>
    where
        P: AsRef<str>,
        R: AsRef<str>,
    {
        for (pattern, replacement) in pairs {
            self.rules
                .push(Replacement::new(pattern.as_ref(), replacement.as_ref())?);
        }
        Ok(self)
    }

    pub fn rules(&self) -> &[Replacement] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Translate a table, applying every rule in order.
    pub fn translate(&self, table: &Table) -> Table {
        self.rules
            .iter()
            .fold(table.clone(), |table, rule| rule.apply(&table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(pairs: &[(&str, &str)]) -> Vocabulary {
        Vocabulary::new(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_value_rewrite_preserves_cardinality() {
        let table = Table::from_entries([
            ("Acrobat", "Require=\"skills.Climbing >= 6\" Type=Combat"),
            ("Thief", "Require=\"skills.Lockpicking >= 6\",\"skills.Climbing >= 6\""),
            ("Woodsman", "Require=\"skills.Tracking >= 8\""),
        ]);
        let translated = vocab(&[
            ("Climbing", "Athletics"),
            ("Lockpicking", "Thievery"),
            ("Tracking", "Survival"),
        ])
        .translate(&table);

        assert_eq!(translated.len(), table.len());
        assert_eq!(
            translated.get("Thief"),
            Some("Require=\"skills.Thievery >= 6\",\"skills.Athletics >= 6\"")
        );
        assert_eq!(translated.get("Woodsman"), Some("Require=\"skills.Survival >= 8\""));
    }

    #[test]
    fn test_global_substitution() {
        let table = Table::from_entries([("Concept", "Skill=Climbing,Climbing,Climbing")]);
        let translated = vocab(&[("Climbing", "Athletics")]).translate(&table);
        assert_eq!(
            translated.get("Concept"),
            Some("Skill=Athletics,Athletics,Athletics")
        );
    }

    #[test]
    fn test_verbatim_key_is_renamed() {
        let table = Table::from_entries([
            ("Lame", "Severity=Major"),
            ("Bad Eyes", "Severity=Minor"),
        ]);
        let translated = vocab(&[("Lame", "Slow")]).translate(&table);

        assert!(!translated.contains("Lame"));
        assert_eq!(translated.get("Slow"), Some("Severity=Major"));
        assert_eq!(translated.names().collect::<Vec<_>>(), vec!["Slow", "Bad Eyes"]);
    }

    #[test]
    fn test_key_renamed_once() {
        let table = Table::from_entries([("Lame", "Severity=Major")]);
        let translated = vocab(&[("Lame", "Slow"), ("Lame", "Hobbled")]).translate(&table);

        assert_eq!(translated.names().collect::<Vec<_>>(), vec!["Slow"]);
        assert!(!translated.contains("Hobbled"));
    }

    #[test]
    fn test_chained_rename() {
        let table = Table::from_entries([("Obscure", "PowerPoints=2 Range=smarts")]);
        let translated =
            vocab(&[("Obscure", "Darkness"), ("Darkness", "Light/Darkness")]).translate(&table);

        assert_eq!(translated.names().collect::<Vec<_>>(), vec!["Light/Darkness"]);
    }

    #[test]
    fn test_order_is_sequential() {
        let table = Table::from_entries([("X", "a")]);

        let forward = vocab(&[("a", "b"), ("b", "c")]).translate(&table);
        assert_eq!(forward.get("X"), Some("c"));

        let reverse = vocab(&[("b", "c"), ("a", "b")]).translate(&table);
        assert_eq!(reverse.get("X"), Some("b"));
    }

    #[test]
    fn test_capture_groups() {
        let table = Table::from_entries([("Scholar", "Require=\"skills.Knowledge (History) >= 8\"")]);
        let translated = vocab(&[(r"Knowledge \((\w+)\)", "Lore ($1)")]).translate(&table);
        assert_eq!(
            translated.get("Scholar"),
            Some("Require=\"skills.Lore (History) >= 8\"")
        );
    }

    #[test]
    fn test_numbered_group_followed_by_letters() {
        let table = Table::from_entries([("Occultist", "Skill=\"Knowledge (Arcana)\"")]);
        let translated = vocab(&[(r"Knowledge \((\w+)\)", "$1s")]).translate(&table);
        assert_eq!(translated.get("Occultist"), Some("Skill=\"Arcanas\""));
    }

    #[test]
    fn test_replacement_text_is_kept_as_written() {
        let rules = vocab(&[(r"Knowledge \((\w+)\)", "$1s"), ("Cost", "$$5")]);
        assert_eq!(rules.rules()[0].replacement(), "$1s");

        let table = Table::from_entries([("Trade", "Note=Cost")]);
        assert_eq!(rules.translate(&table).get("Trade"), Some("Note=$5"));
    }

    #[test]
    fn test_unmatched_rule_is_noop() {
        let table = Table::from_entries([("Bolt", "PowerPoints=1")]);
        let translated = vocab(&[("Quickness", "Speed")]).translate(&table);
        assert_eq!(translated, table);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Vocabulary::new([("Knowledge (", "Lore")]).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidPattern { ref pattern, .. } if pattern == "Knowledge ("));
    }

    #[test]
    fn test_extend_appends() {
        let vocabulary = vocab(&[("a", "b")]).extend([("b", "c")]).unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.rules()[1].pattern(), "b");
    }
}
