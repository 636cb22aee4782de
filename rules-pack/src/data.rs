//! Frontier Companion table data.
//!
//! Base tables are written in the current core vocabulary. The pack adds
//! its own entries on top: some already in the current vocabulary, some
//! carried over from the legacy edition and still written in its
//! vocabulary, which [`legacy_vocabulary`] rewrites. A short removal list
//! drops core entries the setting does not use.

use crate::choice::ChoiceType;
use crate::table::Table;
use crate::translate::Vocabulary;
use once_cell::sync::Lazy;

type Entries = &'static [(&'static str, &'static str)];

// =============================================================================
// Core tables
// =============================================================================

const ARCANAS: Entries = &[
    (
        "Gifted",
        r#"Skill=Focus Powers="Arcane Protection",Bolt,"Boost/Lower Trait",Deflection,Healing"#,
    ),
    (
        "Magic",
        r#"Skill=Spellcasting Powers="Arcane Protection",Blast,Bolt,Burrow,Deflection,Fly,"Light/Darkness",Protection"#,
    ),
    (
        "Miracles",
        r#"Skill=Faith Powers="Arcane Protection","Boost/Lower Trait",Healing,"Light/Darkness",Protection"#,
    ),
    (
        "Psionics",
        r#"Skill=Psionics Powers="Arcane Protection","Boost/Lower Trait",Deflection,Speed"#,
    ),
    (
        "Weird Science",
        r#"Skill="Weird Science" Powers="Arcane Protection",Blast,Bolt,Entangle,Fly,Speed"#,
    ),
];

const ARMORS: Entries = &[
    ("None", "Area=Body Armor=0 MinStr=0 Weight=0"),
    ("Leather Jacket", "Era=Medieval,Modern Area=Torso Armor=1 MinStr=4 Weight=4"),
    ("Chain Hauberk", "Era=Medieval Area=Torso Armor=3 MinStr=8 Weight=25"),
    ("Plate Corselet", "Era=Medieval Area=Torso Armor=4 MinStr=10 Weight=30"),
    ("Kevlar Vest", "Era=Modern Area=Torso Armor=2 MinStr=4 Weight=8"),
];

const CONCEPTS: Entries = &[
    ("Doctor", "Attribute=smarts Edge=Healer Skill=Healing,Notice"),
    (
        "Gunslinger",
        "Attribute=agility Edge=Quick Skill=Shooting,Intimidation",
    ),
    (
        "Preacher",
        r#"Attribute=spirit Edge="Arcane Background (Miracles)" Skill=Faith,Persuasion"#,
    ),
    (
        "Scout",
        "Attribute=agility Edge=Woodsman Skill=Survival,Riding,Notice",
    ),
];

const DEITIES: Entries = &[
    ("None", ""),
    ("The Creator", "Alignment=Good Domain=Healing,Protection"),
    ("The Trickster", "Alignment=Neutral Domain=Luck,Deception"),
    ("The Reckoner", "Alignment=Evil Domain=Death,War"),
];

const EDGES: Entries = &[
    (
        "Acrobat",
        r#"Type=Background Require="agility >= 8","skills.Athletics >= 8""#,
    ),
    ("Alertness", "Type=Background"),
    (
        "Ambidextrous",
        r#"Type=Background Require="agility >= 8""#,
    ),
    (
        "Arcane Background (Magic)",
        r#"Type=Background Imply="arcanas.Magic""#,
    ),
    (
        "Arcane Background (Miracles)",
        r#"Type=Background Imply="arcanas.Miracles""#,
    ),
    (
        "Arcane Resistance",
        r#"Type=Background Require="spirit >= 8""#,
    ),
    ("Berserk", "Type=Background"),
    (
        "Brawny",
        r#"Type=Background Require="strength >= 6","vigor >= 6""#,
    ),
    (
        "Fleet-Footed",
        r#"Type=Background Require="agility >= 6""#,
    ),
    (
        "Healer",
        r#"Type=Professional Require="spirit >= 8""#,
    ),
    (
        "Level Headed",
        r#"Type=Combat Require="advances >= 4","smarts >= 8""#,
    ),
    (
        "Improved Level Headed",
        r#"Type=Combat Require="advances >= 8","features.Level Headed""#,
    ),
    (
        "Linguist",
        r#"Type=Background Require="smarts >= 6""#,
    ),
    ("Luck", "Type=Background"),
    ("Quick", r#"Type=Background Require="agility >= 8""#),
    (
        "Scholar",
        r#"Type=Professional Require="skills.Research >= 8""#,
    ),
    (
        "Thief",
        r#"Type=Professional Require="agility >= 8","skills.Stealth >= 6","skills.Thievery >= 6""#,
    ),
    (
        "Trademark Weapon",
        r#"Type=Combat Require="advances >= 4","skills.Fighting >= 8 || skills.Shooting >= 8""#,
    ),
    (
        "Woodsman",
        r#"Type=Professional Require="spirit >= 6","skills.Survival >= 8""#,
    ),
];

const FEATURES: Entries = &[
    ("Adaptable", r#"Section=feature Note="+1 Edge point""#),
    ("Agile", r#"Section=attribute Note="+1 Agility step""#),
    ("All Thumbs", r#"Section=skill Note="-2 Repair""#),
    ("Armor", r#"Section=combat Note="+2 Armor""#),
    ("Bite", r#"Section=combat Note="Str+d4 bite attack""#),
    ("Level Headed", r#"Section=combat Note="Draw an extra action card""#),
    ("Low Light Vision", r#"Section=feature Note="Ignore dim and dark penalties""#),
    ("Luck", r#"Section=feature Note="+1 Benny each session""#),
    ("Reduced Pace", r#"Section=combat Note="-1 Pace, running die one step lower""#),
    ("Short", r#"Section=combat Note="-1 Toughness""#),
    ("Tough", r#"Section=combat Note="+1 Toughness""#),
];

const GOODIES: Entries = &[
    (
        "Pace",
        r#"Pattern="([-+]\d+)\s+pace" Effect=add Value="$1" Attribute=pace Section=combat Note="%V Pace""#,
    ),
    (
        "Parry",
        r#"Pattern="([-+]\d+)\s+parry" Effect=add Value="$1" Attribute=parry Section=combat Note="%V Parry""#,
    ),
    (
        "Toughness",
        r#"Pattern="([-+]\d+)\s+toughness" Effect=add Value="$1" Attribute=toughness Section=combat Note="%V Toughness""#,
    ),
];

const HINDRANCES: Entries = &[
    ("All Thumbs", "Severity=Minor"),
    ("Bad Eyes", "Severity=Minor"),
    ("Bad Eyes+", "Severity=Major"),
    ("Elderly", "Severity=Major"),
    ("Greedy", "Severity=Minor"),
    ("Heroic", "Severity=Major"),
    ("Loyal", "Severity=Minor"),
    ("Slow", "Severity=Minor"),
    ("Slow+", "Severity=Major"),
    ("Small", "Severity=Minor"),
    ("Stubborn", "Severity=Minor"),
    ("Ugly", "Severity=Minor"),
    ("Young", r#"Severity=Minor Require="advances < 4""#),
];

const LANGUAGES: Entries = &[
    ("Dwarven", ""),
    ("Elven", ""),
    ("English", ""),
    ("Half-Folk", ""),
    ("Saurian", ""),
];

const POWERS: Entries = &[
    (
        "Arcane Protection",
        r#"Advances=0 PowerPoints=1 Range=touch Description="Foes suffer -2 to affect the target""#,
    ),
    (
        "Blast",
        r#"Advances=4 PowerPoints=3 Range="smarts x2" Description="2d6 damage in a Medium Blast Template""#,
    ),
    (
        "Bolt",
        r#"Advances=0 PowerPoints=1 Range="smarts x2" Description="2d6 damage to one target" Modifier="+2 PP Damage","+1 PP Disintegrate""#,
    ),
    (
        "Boost/Lower Trait",
        r#"Advances=0 PowerPoints=3 Range=smarts Description="Raise or lower a trait one step""#,
    ),
    (
        "Burrow",
        r#"Advances=4 PowerPoints=2 Range=smarts Description="Move through earth at full Pace""#,
    ),
    (
        "Deflection",
        r#"Advances=0 PowerPoints=3 Range=smarts Description="Attackers suffer -2""#,
    ),
    (
        "Entangle",
        r#"Advances=0 PowerPoints=2 Range=smarts Description="Target is Entangled or Bound""#,
    ),
    (
        "Fly",
        r#"Advances=8 PowerPoints=3 Range=touch Description="Fly at Pace 12""#,
    ),
    (
        "Healing",
        r#"Advances=0 PowerPoints=3 Range=touch Description="Remove Wounds less than an hour old""#,
    ),
    (
        "Light/Darkness",
        r#"Advances=0 PowerPoints=2 Range=smarts Description="Creates light or darkness""#,
    ),
    (
        "Protection",
        r#"Advances=0 PowerPoints=1 Range=smarts Description="+2 Armor""#,
    ),
    (
        "Speed",
        r#"Advances=4 PowerPoints=2 Range=smarts Description="Doubles Pace""#,
    ),
];

const RACES: Entries = &[
    (
        "Dwarf",
        r#"Features="Low Light Vision","Reduced Pace",Tough Languages=Dwarven"#,
    ),
    (
        "Elf",
        r#"Features=Agile,"All Thumbs","Low Light Vision" Languages=Elven"#,
    ),
    ("Half-Folk", "Features=Luck,Short Languages=Half-Folk"),
    ("Human", "Features=Adaptable Languages=English"),
    ("Saurian", "Features=Armor,Bite Languages=Saurian"),
];

const SHIELDS: Entries = &[
    ("None", "Parry=0 Cover=0 MinStr=0 Weight=0"),
    ("Small Shield", "Era=Medieval Parry=1 Cover=0 MinStr=4 Weight=4"),
    ("Medium Shield", "Era=Medieval Parry=2 Cover=2 MinStr=6 Weight=8"),
    ("Large Shield", "Era=Medieval Parry=3 Cover=4 MinStr=8 Weight=12"),
];

const SKILLS: Entries = &[
    ("Academics", "Attribute=smarts"),
    ("Athletics", "Attribute=agility Core=y"),
    ("Battle", "Attribute=smarts"),
    ("Boating", "Attribute=agility"),
    ("Common Knowledge", "Attribute=smarts Core=y"),
    ("Driving", "Attribute=agility Era=Modern,Future"),
    ("Faith", "Attribute=spirit"),
    ("Fighting", "Attribute=agility"),
    ("Focus", "Attribute=spirit"),
    ("Gambling", "Attribute=smarts"),
    ("Healing", "Attribute=smarts"),
    ("Intimidation", "Attribute=spirit"),
    ("Notice", "Attribute=smarts Core=y"),
    ("Occult", "Attribute=smarts"),
    ("Persuasion", "Attribute=spirit Core=y"),
    ("Piloting", "Attribute=agility Era=Modern,Future"),
    ("Psionics", "Attribute=smarts"),
    ("Research", "Attribute=smarts"),
    ("Riding", "Attribute=agility"),
    ("Shooting", "Attribute=agility"),
    ("Spellcasting", "Attribute=smarts"),
    ("Stealth", "Attribute=agility Core=y"),
    ("Survival", "Attribute=smarts"),
    ("Thievery", "Attribute=agility"),
    ("Weird Science", "Attribute=smarts"),
];

const WEAPONS: Entries = &[
    ("Unarmed", "Damage=Str+d0 MinStr=0 Weight=0 Category=Unarmed"),
    (
        "Dagger",
        "Era=Medieval,Modern Damage=Str+d4 MinStr=4 Weight=1 Category=One-Handed Range=3",
    ),
    ("Axe", "Era=Medieval Damage=Str+d6 MinStr=6 Weight=4 Category=One-Handed"),
    (
        "Long Sword",
        "Era=Medieval Damage=Str+d8 MinStr=8 Weight=3 Category=One-Handed",
    ),
    (
        "Spear",
        "Era=Medieval Damage=Str+d6 MinStr=6 Weight=3 Category=Two-Handed Range=3 Parry=1",
    ),
    (
        "Bow",
        "Era=Medieval Damage=2d6 MinStr=6 Weight=3 Category=Ranged Range=12",
    ),
    (
        "Crossbow",
        "Era=Medieval Damage=2d6 MinStr=6 Weight=5 Category=Ranged Range=10 AP=2",
    ),
];

// =============================================================================
// Frontier Companion additions and removals
// =============================================================================

const PACK_EDGES: Entries = &[
    (
        "Duelist",
        r#"Type=Combat Require="skills.Shooting >= 6","features.Quick""#,
    ),
    (
        "Fan the Hammer",
        r#"Type=Combat Require="advances >= 4","agility >= 8","skills.Shooting >= 8""#,
    ),
];

const PACK_HINDRANCES: Entries = &[
    ("Night Terrors", "Severity=Major"),
    ("Wanted", "Severity=Minor"),
    ("Wanted+", "Severity=Major"),
];

const PACK_LANGUAGES: Entries = &[("Lakota", ""), ("Spanish", "")];

const PACK_WEAPONS: Entries = &[
    (
        "Colt Peacemaker",
        "Era=Modern Damage=2d6+1 MinStr=4 Weight=4 Category=Ranged Range=12 AP=1",
    ),
    (
        "Sawed-Off Shotgun",
        "Era=Modern Damage=1-3d6 MinStr=6 Weight=6 Category=Ranged Range=5",
    ),
    (
        "Winchester '73",
        "Era=Modern Damage=2d8 MinStr=6 Weight=10 Category=Ranged Range=24 AP=2",
    ),
];

const PACK_ARMORS: Entries = &[("Duster", "Era=Modern Area=Torso Armor=1 MinStr=4 Weight=5")];

// Carried over from the legacy edition; translated before use.

const LEGACY_ARCANAS: Entries = &[(
    "Hexslinging",
    "Skill=Spellcasting Powers=Bolt,Obscure,Quickness,Deflection",
)];

const LEGACY_CONCEPTS: Entries = &[
    (
        "Trapper",
        r#"Attribute=strength Edge="Mountain Man" Skill=Tracking,Climbing,Shooting"#,
    ),
    (
        "Pinkerton",
        r#"Attribute=smarts Edge=Sleuth Skill=Investigation,"Streetwise","Knowledge (Law)""#,
    ),
];

const LEGACY_EDGES: Entries = &[
    (
        "Cat Burglar",
        r#"Type=Professional Require="skills.Lockpicking >= 8","skills.Climbing >= 6""#,
    ),
    (
        "Mountain Man",
        r#"Type=Background Require="skills.Climbing >= 6","skills.Tracking >= 6""#,
    ),
    (
        "Old Hand",
        r#"Type=Leadership Require="advances >= 8","skills.Knowledge (Battle) >= 8""#,
    ),
    (
        "Sleuth",
        r#"Type=Professional Require="skills.Investigation >= 8","skills.Streetwise >= 6""#,
    ),
    (
        "Occultist",
        r#"Type=Professional Require="skills.Knowledge (Occult) >= 6""#,
    ),
];

const LEGACY_HINDRANCES: Entries = &[("Lame", r#"Severity=Major Note="-2 Pace""#)];

const LEGACY_POWERS: Entries = &[
    (
        "Obscure",
        r#"Advances=0 PowerPoints=2 Range=smarts Description="Creates light or darkness""#,
    ),
    (
        "Quickness",
        r#"Advances=4 PowerPoints=2 Range=touch Description="Doubles Pace, two actions without multi-action penalty""#,
    ),
];

const REMOVED_ARCANAS: &[&str] = &["Psionics"];
const REMOVED_LANGUAGES: &[&str] = &["Saurian"];
const REMOVED_RACES: &[&str] = &["Saurian"];
const REMOVED_SKILLS: &[&str] = &["Piloting", "Psionics"];

/// Legacy → current vocabulary, in application order.
///
/// `Obscure` reaches `Light/Darkness` in two hops through `Darkness`; keep
/// the two rules adjacent and in this order.
pub const LEGACY_VOCABULARY: &[(&str, &str)] = &[
    ("Climbing", "Athletics"),
    ("Swimming", "Athletics"),
    ("Throwing", "Athletics"),
    ("Lockpicking", "Thievery"),
    ("Investigation", "Research"),
    ("Streetwise", "Common Knowledge"),
    ("Tracking", "Survival"),
    (r"Knowledge \(Battle\)", "Battle"),
    (r"Knowledge \((Arcana|Occult)\)", "Occult"),
    (r"Knowledge \([^)]*\)", "Academics"),
    ("Lame", "Slow+"),
    ("Quickness", "Speed"),
    ("Obscure", "Darkness"),
    ("Darkness", "Light/Darkness"),
];

static LEGACY: Lazy<Vocabulary> = Lazy::new(|| {
    Vocabulary::new(LEGACY_VOCABULARY.iter().copied())
        .expect("built-in legacy vocabulary patterns are valid")
});

/// The compiled legacy → current vocabulary.
pub fn legacy_vocabulary() -> &'static Vocabulary {
    &LEGACY
}

/// The core table for `kind`.
pub fn base_table(kind: ChoiceType) -> Table {
    Table::from_entries(base_entries(kind).iter().copied())
}

/// Pack entries already written in the current vocabulary.
pub fn pack_additions(kind: ChoiceType) -> Table {
    let entries: Entries = match kind {
        ChoiceType::Armor => PACK_ARMORS,
        ChoiceType::Edge => PACK_EDGES,
        ChoiceType::Hindrance => PACK_HINDRANCES,
        ChoiceType::Language => PACK_LANGUAGES,
        ChoiceType::Weapon => PACK_WEAPONS,
        _ => &[],
    };
    Table::from_entries(entries.iter().copied())
}

/// Pack entries still written in the legacy vocabulary.
pub fn legacy_additions(kind: ChoiceType) -> Table {
    let entries: Entries = match kind {
        ChoiceType::Arcana => LEGACY_ARCANAS,
        ChoiceType::Concept => LEGACY_CONCEPTS,
        ChoiceType::Edge => LEGACY_EDGES,
        ChoiceType::Hindrance => LEGACY_HINDRANCES,
        ChoiceType::Power => LEGACY_POWERS,
        _ => &[],
    };
    Table::from_entries(entries.iter().copied())
}

/// Core entries the pack drops.
pub fn pack_removals(kind: ChoiceType) -> &'static [&'static str] {
    match kind {
        ChoiceType::Arcana => REMOVED_ARCANAS,
        ChoiceType::Language => REMOVED_LANGUAGES,
        ChoiceType::Race => REMOVED_RACES,
        ChoiceType::Skill => REMOVED_SKILLS,
        _ => &[],
    }
}

fn base_entries(kind: ChoiceType) -> Entries {
    match kind {
        ChoiceType::Arcana => ARCANAS,
        ChoiceType::Armor => ARMORS,
        ChoiceType::Concept => CONCEPTS,
        ChoiceType::Deity => DEITIES,
        ChoiceType::Edge => EDGES,
        ChoiceType::Feature => FEATURES,
        ChoiceType::Goody => GOODIES,
        ChoiceType::Hindrance => HINDRANCES,
        ChoiceType::Language => LANGUAGES,
        ChoiceType::Power => POWERS,
        ChoiceType::Race => RACES,
        ChoiceType::Shield => SHIELDS,
        ChoiceType::Skill => SKILLS,
        ChoiceType::Weapon => WEAPONS,
    }
}
