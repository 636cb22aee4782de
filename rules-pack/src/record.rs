//! Flat `Key=Value` record strings.
//!
//! A record is the attribute string attached to one named table entry, for
//! example `Advances=0 PowerPoints=2 Range=smarts Description="Creates light"`.
//! Fields are separated by whitespace or semicolons.
//! A value may be a comma separated list of atoms. An atom that starts with a
//! double or single quote runs to the matching quote and may contain spaces
//! and commas.

/// One `Key=Value` occurrence in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    /// Atoms of the value with surrounding quotes removed.
    pub items: Vec<String>,
}

/// A parsed record.
///
/// Parsing never fails: tokens that are not `Key=Value` pairs are skipped,
/// so a malformed field simply reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Parse a record string.
    pub fn parse(text: &str) -> Self {
        let mut fields = Vec::new();

        for token in split_unquoted(text, is_field_separator) {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            if !is_key(key) {
                continue;
            }
            let items = split_unquoted(value, |c| c == ',')
                .into_iter()
                .map(unquote)
                .filter(|atom| !atom.is_empty())
                .map(str::to_string)
                .collect();
            fields.push(Field {
                key: key.to_string(),
                items,
            });
        }

        Self { fields }
    }

    /// All fields in record order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `key` occurs at all, even with an empty value.
    pub fn has(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    /// The value of the last occurrence of `key`, atoms rejoined with commas.
    pub fn text(&self, key: &str) -> Option<String> {
        let field = self.fields.iter().rev().find(|f| f.key == key)?;
        if field.items.is_empty() {
            None
        } else {
            Some(field.items.join(","))
        }
    }

    /// Every atom of every occurrence of `key`, in order.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.key == key)
            .flat_map(|f| f.items.iter().cloned())
            .collect()
    }

    /// The value of `key` as an integer.
    pub fn number(&self, key: &str) -> Option<i32> {
        self.text(key)?.trim().parse().ok()
    }

    /// The value of `key` as a yes/no flag.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.text(key)?.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Some(true),
            "n" | "no" | "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl From<&str> for Record {
    fn from(text: &str) -> Self {
        Record::parse(text)
    }
}

fn is_field_separator(c: char) -> bool {
    c.is_whitespace() || c == ';'
}

fn is_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split on separator characters that are not inside a quoted atom.
///
/// A quote only opens an atom at its start (after `=`, `,`, `;` or a separator),
/// so apostrophes inside words are literal.
fn split_unquoted(text: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if is_separator(c) => {
                if start < i {
                    parts.push(&text[start..i]);
                }
                start = i + c.len_utf8();
            }
            None if (c == '"' || c == '\'') && opens_atom(&text[start..i]) => quote = Some(c),
            None => {}
        }
    }

    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

fn opens_atom(prefix: &str) -> bool {
    prefix.is_empty() || prefix.ends_with(['=', ',', ';'])
}

fn unquote(atom: &str) -> &str {
    let atom = atom.trim();
    for q in ['"', '\''] {
        if atom.len() >= 2 && atom.starts_with(q) && atom.ends_with(q) {
            return &atom[1..atom.len() - 1];
        }
    }
    atom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_record() {
        let record =
            Record::parse(r#"Advances=0 PowerPoints=2 Range=smarts Description="Creates light""#);
        assert_eq!(record.number("Advances"), Some(0));
        assert_eq!(record.number("PowerPoints"), Some(2));
        assert_eq!(record.text("Range").as_deref(), Some("smarts"));
        assert_eq!(record.text("Description").as_deref(), Some("Creates light"));
        assert_eq!(record.fields().len(), 4);
    }

    #[test]
    fn test_quoted_list_items() {
        let record = Record::parse(
            r#"Skill=Spellcasting Powers="Arcane Protection",Bolt,'Boost/Lower Trait'"#,
        );
        assert_eq!(
            record.list("Powers"),
            vec!["Arcane Protection", "Bolt", "Boost/Lower Trait"]
        );
    }

    #[test]
    fn test_quoted_atom_keeps_commas() {
        let record = Record::parse(r#"Note="Pace -1, running die d4""#);
        assert_eq!(record.list("Note"), vec!["Pace -1, running die d4"]);
    }

    #[test]
    fn test_apostrophe_inside_word_is_literal() {
        let record = Record::parse("Features=Nature's_Ally Languages=Elven");
        assert_eq!(record.list("Features"), vec!["Nature's_Ally"]);
        assert_eq!(record.text("Languages").as_deref(), Some("Elven"));
    }

    #[test]
    fn test_missing_and_malformed_fields_read_as_absent() {
        let record = Record::parse("Type=Combat stray =orphan Require=");
        assert_eq!(record.text("Type").as_deref(), Some("Combat"));
        assert!(record.text("Require").is_none());
        assert!(record.has("Require"));
        assert!(record.list("Imply").is_empty());
        assert_eq!(record.fields().len(), 2);
    }

    #[test]
    fn test_repeated_key() {
        let record = Record::parse("Features=A,B Features=C");
        assert_eq!(record.list("Features"), vec!["A", "B", "C"]);
        assert_eq!(record.text("Features").as_deref(), Some("C"));
    }

    #[test]
    fn test_number_and_flag() {
        let record = Record::parse("AP=+2 Core=y Weight=heavy");
        assert_eq!(record.number("AP"), Some(2));
        assert_eq!(record.flag("Core"), Some(true));
        assert_eq!(record.number("Weight"), None);
        assert_eq!(record.flag("Weight"), None);
    }

    #[test]
    fn test_semicolon_separated_fields() {
        let record = Record::parse(r#"Skill=Spellcasting;Powers=Bolt,Blast; Note="a; b""#);
        assert_eq!(record.text("Skill").as_deref(), Some("Spellcasting"));
        assert_eq!(record.list("Powers"), vec!["Bolt", "Blast"]);
        assert_eq!(record.text("Note").as_deref(), Some("a; b"));
        assert_eq!(record.fields().len(), 3);
    }

    #[test]
    fn test_empty_record() {
        assert!(Record::parse("").is_empty());
        assert!(Record::parse("   ").is_empty());
    }
}
