//! Rule tables and their composition.
//!
//! A table maps an entry name to its record string. Tables are values: every
//! derivation (`merged`, `without`, `renamed`, translation) returns a new
//! table and leaves its input untouched, so the build order of a rule set
//! is an explicit pipeline.

use crate::record::Record;
use crate::translate::Vocabulary;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered `name -> record` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    entries: IndexMap<String, String>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from literal `(name, record)` pairs.
    ///
    /// A repeated name keeps its first position and its last record.
    pub fn from_entries<N, R>(entries: impl IntoIterator<Item = (N, R)>) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, record)| (name.into(), record.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The raw record string for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// The parsed record for `name`.
    pub fn record(&self, name: &str) -> Option<Record> {
        self.get(name).map(Record::parse)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record.as_str()))
    }

    /// This table with `additions` laid over it.
    ///
    /// Existing names keep their position but take the added record; new
    /// names are appended in the order of `additions`.
    pub fn merged(&self, additions: &Table) -> Table {
        let mut entries = self.entries.clone();
        for (name, record) in &additions.entries {
            entries.insert(name.clone(), record.clone());
        }
        Table { entries }
    }

    /// This table without the named entries. Unknown names are ignored.
    pub fn without<S: AsRef<str>>(&self, names: &[S]) -> Table {
        Table {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| !names.iter().any(|n| n.as_ref() == name.as_str()))
                .map(|(name, record)| (name.clone(), record.clone()))
                .collect(),
        }
    }

    /// This table with the entry `from` moved to the key `to`, in place.
    ///
    /// If `to` already exists the moved record replaces it; the entry then
    /// sits wherever the first of the two names sat.
    pub fn renamed(&self, from: &str, to: &str) -> Table {
        if !self.contains(from) {
            return self.clone();
        }
        let mut entries: IndexMap<String, String> = IndexMap::with_capacity(self.len());
        for (name, record) in &self.entries {
            if name == from {
                entries.insert(to.to_string(), record.clone());
            } else if name == to {
                entries
                    .entry(name.clone())
                    .or_insert_with(|| record.clone());
            } else {
                entries.insert(name.clone(), record.clone());
            }
        }
        Table { entries }
    }

    /// This table with every record passed through `f`.
    pub fn map_records(&self, mut f: impl FnMut(&str) -> String) -> Table {
        Table {
            entries: self
                .entries
                .iter()
                .map(|(name, record)| (name.clone(), f(record)))
                .collect(),
        }
    }
}

impl<N: Into<String>, R: Into<String>> FromIterator<(N, R)> for Table {
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        Table::from_entries(iter)
    }
}

/// Step-by-step composition of one table.
///
/// ```
/// use rules_pack::table::{Table, TableBuilder};
///
/// let base = Table::from_entries([("Bolt", "PowerPoints=1"), ("Fly", "PowerPoints=3")]);
/// let extra = Table::from_entries([("Burrow", "PowerPoints=2")]);
/// let table = TableBuilder::new(base).add(&extra).remove(&["Fly"]).build();
/// assert_eq!(table.names().collect::<Vec<_>>(), vec!["Bolt", "Burrow"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    /// Start from a base table.
    pub fn new(base: Table) -> Self {
        Self { table: base }
    }

    /// Lay `additions` over the table.
    pub fn add(self, additions: &Table) -> Self {
        Self {
            table: self.table.merged(additions),
        }
    }

    /// Translate `additions` with `vocabulary`, then lay them over the table.
    pub fn add_translated(self, additions: &Table, vocabulary: &Vocabulary) -> Self {
        self.add(&vocabulary.translate(additions))
    }

    /// Drop the named entries.
    pub fn remove<S: AsRef<str>>(self, names: &[S]) -> Self {
        Self {
            table: self.table.without(names),
        }
    }

    /// Translate the whole table with `vocabulary`.
    pub fn translate(self, vocabulary: &Vocabulary) -> Self {
        Self {
            table: vocabulary.translate(&self.table),
        }
    }

    pub fn build(self) -> Table {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Table {
        Table::from_entries([
            ("Dwarf", "Features=Low_Light_Vision,Tough"),
            ("Elf", "Features=Agile,Low_Light_Vision"),
            ("Human", "Features=Adaptable"),
        ])
    }

    #[test]
    fn test_merged_replaces_and_appends() {
        let additions = Table::from_entries([
            ("Elf", "Features=Agile"),
            ("Half-Folk", "Features=Small,Luck"),
        ]);
        let merged = base().merged(&additions);

        assert_eq!(
            merged.names().collect::<Vec<_>>(),
            vec!["Dwarf", "Elf", "Human", "Half-Folk"]
        );
        assert_eq!(merged.get("Elf"), Some("Features=Agile"));
    }

    #[test]
    fn test_derivations_leave_input_untouched() {
        let original = base();
        let _ = original.without(&["Elf"]);
        let _ = original.renamed("Elf", "Wood Elf");
        let _ = original.merged(&Table::from_entries([("Orc", "")]));
        assert_eq!(original, base());
    }

    #[test]
    fn test_without_ignores_unknown_names() {
        let table = base().without(&["Elf", "Gnome"]);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Dwarf", "Human"]);
    }

    #[test]
    fn test_renamed_keeps_position() {
        let table = base().renamed("Elf", "Wood Elf");
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            vec!["Dwarf", "Wood Elf", "Human"]
        );
        assert_eq!(table.get("Wood Elf"), Some("Features=Agile,Low_Light_Vision"));
        assert!(!table.contains("Elf"));
    }

    #[test]
    fn test_renamed_onto_existing_name() {
        let table = base().renamed("Human", "Dwarf");
        assert_eq!(table.len(), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["Dwarf", "Elf"]);
        assert_eq!(table.get("Dwarf"), Some("Features=Adaptable"));
    }

    #[test]
    fn test_record_lookup() {
        let record = base().record("Dwarf").unwrap();
        assert_eq!(record.list("Features"), vec!["Low_Light_Vision", "Tough"]);
        assert!(base().record("Orc").is_none());
    }

    #[test]
    fn test_json_is_a_plain_object() {
        let json = serde_json::to_string(&base().without(&["Elf", "Human"])).unwrap();
        assert_eq!(json, r#"{"Dwarf":"Features=Low_Light_Vision,Tough"}"#);
    }
}
