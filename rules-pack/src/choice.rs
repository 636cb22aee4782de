//! Choice types and their typed field sets.
//!
//! Every table entry belongs to one [`ChoiceType`]. Parsing its record
//! yields a [`Choice`], one variant per type, carrying exactly the fields
//! the host registration call for that type consumes. Absent or malformed
//! fields come through as `None` or an empty list.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A choice type tag outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown choice type: {0}")]
pub struct UnknownChoiceType(pub String);

/// The closed set of choice types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChoiceType {
    Arcana,
    Armor,
    Concept,
    Deity,
    Edge,
    Feature,
    Goody,
    Hindrance,
    Language,
    Power,
    Race,
    Shield,
    Skill,
    Weapon,
}

impl ChoiceType {
    pub fn name(&self) -> &'static str {
        match self {
            ChoiceType::Arcana => "Arcana",
            ChoiceType::Armor => "Armor",
            ChoiceType::Concept => "Concept",
            ChoiceType::Deity => "Deity",
            ChoiceType::Edge => "Edge",
            ChoiceType::Feature => "Feature",
            ChoiceType::Goody => "Goody",
            ChoiceType::Hindrance => "Hindrance",
            ChoiceType::Language => "Language",
            ChoiceType::Power => "Power",
            ChoiceType::Race => "Race",
            ChoiceType::Shield => "Shield",
            ChoiceType::Skill => "Skill",
            ChoiceType::Weapon => "Weapon",
        }
    }

    pub fn all() -> &'static [ChoiceType] {
        &[
            ChoiceType::Arcana,
            ChoiceType::Armor,
            ChoiceType::Concept,
            ChoiceType::Deity,
            ChoiceType::Edge,
            ChoiceType::Feature,
            ChoiceType::Goody,
            ChoiceType::Hindrance,
            ChoiceType::Language,
            ChoiceType::Power,
            ChoiceType::Race,
            ChoiceType::Shield,
            ChoiceType::Skill,
            ChoiceType::Weapon,
        ]
    }

    /// The group this type is listed under in the host's choice catalog:
    /// the type name pluralised and lower-camel-cased. Features are not
    /// listed.
    pub fn catalog_group(&self) -> Option<&'static str> {
        match self {
            ChoiceType::Arcana => Some("arcanas"),
            ChoiceType::Armor => Some("armors"),
            ChoiceType::Concept => Some("concepts"),
            ChoiceType::Deity => Some("deities"),
            ChoiceType::Edge => Some("edges"),
            ChoiceType::Feature => None,
            ChoiceType::Goody => Some("goodies"),
            ChoiceType::Hindrance => Some("hindrances"),
            ChoiceType::Language => Some("languages"),
            ChoiceType::Power => Some("powers"),
            ChoiceType::Race => Some("races"),
            ChoiceType::Shield => Some("shields"),
            ChoiceType::Skill => Some("skills"),
            ChoiceType::Weapon => Some("weapons"),
        }
    }

    /// The name the table of this type goes by, catalog group or not.
    pub fn table_name(&self) -> &'static str {
        self.catalog_group().unwrap_or("features")
    }

    /// Whether registration is followed by derived-rule attachment.
    pub fn has_extra_rules(&self) -> bool {
        matches!(
            self,
            ChoiceType::Edge | ChoiceType::Hindrance | ChoiceType::Race
        )
    }
}

impl fmt::Display for ChoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChoiceType {
    type Err = UnknownChoiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChoiceType::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownChoiceType(s.to_string()))
    }
}

/// An arcane background: the skill it casts with and the powers it opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcanaChoice {
    pub skill: Option<String>,
    pub powers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArmorChoice {
    /// Settings the item appears in (`Medieval`, `Modern`, ...); empty means all.
    pub eras: Vec<String>,
    /// Body area covered: `Body`, `Torso`, `Arms`, `Legs` or `Head`.
    pub area: Option<String>,
    pub armor: Option<i32>,
    /// Minimum Strength die size to use it without penalty.
    pub min_str: Option<i32>,
    pub weight: Option<i32>,
}

/// A character concept: suggested attributes, edges and skills.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptChoice {
    pub attributes: Vec<String>,
    pub edges: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeityChoice {
    pub alignment: Option<String>,
    /// Power domains granted to followers.
    pub domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeChoice {
    /// Prerequisite expressions, all of which must hold.
    pub requires: Vec<String>,
    /// Expressions the edge expects to hold; unmet ones are flagged, not refused.
    pub implies: Vec<String>,
    /// Edge categories (`Background`, `Combat`, ...).
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureChoice {
    /// Sheet sections the notes are listed under.
    pub sections: Vec<String>,
    pub notes: Vec<String>,
}

/// A situational bonus keyed on a sheet note pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodyChoice {
    /// Regex matched against sheet notes.
    pub pattern: Option<String>,
    /// How the matched value combines: `add`, `max`, ...
    pub effect: Option<String>,
    /// Value expression, usually a capture reference such as `$1`.
    pub value: Option<String>,
    pub attributes: Vec<String>,
    pub sections: Vec<String>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HindranceChoice {
    pub requires: Vec<String>,
    /// `Minor` or `Major`.
    pub severity: Option<String>,
}

/// Languages carry no fields; the name is the language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageChoice;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerChoice {
    /// Advances needed before the power can be taken.
    pub advances: Option<i32>,
    pub power_points: Option<i32>,
    pub range: Option<String>,
    pub description: Option<String>,
    pub school: Option<String>,
    /// Optional cost modifiers, such as `+2 PP Damage`.
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceChoice {
    pub requires: Vec<String>,
    /// Racial features, each a `Feature` table entry.
    pub features: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShieldChoice {
    /// Settings the item appears in; empty means all.
    pub eras: Vec<String>,
    pub parry: Option<i32>,
    /// Cover penalty applied to ranged attacks against the bearer.
    pub cover: Option<i32>,
    pub min_str: Option<i32>,
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillChoice {
    /// Linked attribute, lower case.
    pub attribute: Option<String>,
    /// Core skills start at d4 for every character.
    pub core: bool,
    /// Settings the skill exists in; empty means all.
    pub eras: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaponChoice {
    /// Settings the item appears in; empty means all.
    pub eras: Vec<String>,
    /// Damage roll, `Str+d6` for melee.
    pub damage: Option<String>,
    pub min_str: Option<i32>,
    pub weight: Option<i32>,
    pub category: Option<String>,
    /// Short range in inches; absent for melee weapons.
    pub range: Option<i32>,
    /// Armor piercing (`AP`).
    pub armor_piercing: Option<i32>,
    /// Parry modifier while wielded.
    pub parry: Option<i32>,
}

/// A parsed choice, tagged with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Arcana(ArcanaChoice),
    Armor(ArmorChoice),
    Concept(ConceptChoice),
    Deity(DeityChoice),
    Edge(EdgeChoice),
    Feature(FeatureChoice),
    Goody(GoodyChoice),
    Hindrance(HindranceChoice),
    Language(LanguageChoice),
    Power(PowerChoice),
    Race(RaceChoice),
    Shield(ShieldChoice),
    Skill(SkillChoice),
    Weapon(WeaponChoice),
}

impl Choice {
    /// Extract the fields `kind` needs from `record`.
    pub fn parse(kind: ChoiceType, record: &Record) -> Choice {
        match kind {
            ChoiceType::Arcana => Choice::Arcana(ArcanaChoice {
                skill: record.text("Skill"),
                powers: record.list("Powers"),
            }),
            ChoiceType::Armor => Choice::Armor(ArmorChoice {
                eras: record.list("Era"),
                area: record.text("Area"),
                armor: record.number("Armor"),
                min_str: record.number("MinStr"),
                weight: record.number("Weight"),
            }),
            ChoiceType::Concept => Choice::Concept(ConceptChoice {
                attributes: record.list("Attribute"),
                edges: record.list("Edge"),
                skills: record.list("Skill"),
            }),
            ChoiceType::Deity => Choice::Deity(DeityChoice {
                alignment: record.text("Alignment"),
                domains: record.list("Domain"),
            }),
            ChoiceType::Edge => Choice::Edge(EdgeChoice {
                requires: record.list("Require"),
                implies: record.list("Imply"),
                types: record.list("Type"),
            }),
            ChoiceType::Feature => Choice::Feature(FeatureChoice {
                sections: record.list("Section"),
                notes: record.list("Note"),
            }),
            ChoiceType::Goody => Choice::Goody(GoodyChoice {
                pattern: record.text("Pattern"),
                effect: record.text("Effect"),
                value: record.text("Value"),
                attributes: record.list("Attribute"),
                sections: record.list("Section"),
                notes: record.list("Note"),
            }),
            ChoiceType::Hindrance => Choice::Hindrance(HindranceChoice {
                requires: record.list("Require"),
                severity: record.text("Severity"),
            }),
            ChoiceType::Language => Choice::Language(LanguageChoice),
            ChoiceType::Power => Choice::Power(PowerChoice {
                advances: record.number("Advances"),
                power_points: record.number("PowerPoints"),
                range: record.text("Range"),
                description: record.text("Description"),
                school: record.text("School"),
                modifiers: record.list("Modifier"),
            }),
            ChoiceType::Race => Choice::Race(RaceChoice {
                requires: record.list("Require"),
                features: record.list("Features"),
                languages: record.list("Languages"),
            }),
            ChoiceType::Shield => Choice::Shield(ShieldChoice {
                eras: record.list("Era"),
                parry: record.number("Parry"),
                cover: record.number("Cover"),
                min_str: record.number("MinStr"),
                weight: record.number("Weight"),
            }),
            ChoiceType::Skill => Choice::Skill(SkillChoice {
                attribute: record.text("Attribute"),
                core: record.flag("Core").unwrap_or(false),
                eras: record.list("Era"),
            }),
            ChoiceType::Weapon => Choice::Weapon(WeaponChoice {
                eras: record.list("Era"),
                damage: record.text("Damage"),
                min_str: record.number("MinStr"),
                weight: record.number("Weight"),
                category: record.text("Category"),
                range: record.number("Range"),
                armor_piercing: record.number("AP"),
                parry: record.number("Parry"),
            }),
        }
    }

    pub fn kind(&self) -> ChoiceType {
        match self {
            Choice::Arcana(_) => ChoiceType::Arcana,
            Choice::Armor(_) => ChoiceType::Armor,
            Choice::Concept(_) => ChoiceType::Concept,
            Choice::Deity(_) => ChoiceType::Deity,
            Choice::Edge(_) => ChoiceType::Edge,
            Choice::Feature(_) => ChoiceType::Feature,
            Choice::Goody(_) => ChoiceType::Goody,
            Choice::Hindrance(_) => ChoiceType::Hindrance,
            Choice::Language(_) => ChoiceType::Language,
            Choice::Power(_) => ChoiceType::Power,
            Choice::Race(_) => ChoiceType::Race,
            Choice::Shield(_) => ChoiceType::Shield,
            Choice::Skill(_) => ChoiceType::Skill,
            Choice::Weapon(_) => ChoiceType::Weapon,
        }
    }
}
