//! Filling in unset character attributes at random.
//!
//! The host calls [`randomize_one_attribute`] when a character is missing a
//! value the pack knows how to pick. Picks come from what was registered:
//! a random race is one of the host's catalogued races, not a hard-coded
//! list.

use crate::host::RulesHost;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// A character's attributes by name.
pub type Attributes = IndexMap<String, String>;

const GENDERS: &[&str] = &["Female", "Male"];

/// Placeholder entry some tables carry for "nothing chosen".
const NONE_ENTRY: &str = "None";

/// Attributes this module can fill.
pub const RANDOMIZABLE: &[&str] = &["arcana", "concept", "deity", "gender", "race"];

/// Pick a value for `attribute` if the character has none.
///
/// Returns the value written, or `None` when the attribute was already
/// set, nothing was available to pick from, or the attribute is not one
/// this pack randomizes (logged as a warning).
pub fn randomize_one_attribute<R: Rng + ?Sized>(
    host: &dyn RulesHost,
    attributes: &mut Attributes,
    attribute: &str,
    rng: &mut R,
) -> Option<String> {
    if attributes.get(attribute).is_some_and(|value| !value.is_empty()) {
        return None;
    }

    let picked = match attribute {
        "arcana" => pick_choice(host, "arcanas", rng),
        "concept" => pick_choice(host, "concepts", rng),
        "deity" => pick_choice(host, "deities", rng),
        "race" => pick_choice(host, "races", rng),
        "gender" => GENDERS.choose(rng).map(|gender| gender.to_string()),
        _ => {
            warn!(attribute, "no randomizer for attribute");
            return None;
        }
    }?;

    debug!(attribute, value = %picked, "randomized attribute");
    attributes.insert(attribute.to_string(), picked.clone());
    Some(picked)
}

fn pick_choice<R: Rng + ?Sized>(host: &dyn RulesHost, group: &str, rng: &mut R) -> Option<String> {
    let names: Vec<&str> = host
        .choices(group)?
        .names()
        .filter(|name| *name != NONE_ENTRY)
        .collect();
    names.choose(rng).map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RulesHost;
    use crate::testing::RecordingHost;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn host() -> RecordingHost {
        let mut host = RecordingHost::new();
        host.add_choice("races", "Dwarf", "Features=Tough");
        host.add_choice("races", "Elf", "Features=Agile");
        host.add_choice("deities", "None", "");
        host.add_choice("deities", "The Creator", "Alignment=Good");
        host
    }

    #[test]
    fn test_picks_registered_race() {
        let host = host();
        let mut rng = StdRng::seed_from_u64(7);
        let mut attributes = Attributes::new();

        let picked = randomize_one_attribute(&host, &mut attributes, "race", &mut rng).unwrap();
        assert!(["Dwarf", "Elf"].contains(&picked.as_str()));
        assert_eq!(attributes.get("race"), Some(&picked));
    }

    #[test]
    fn test_skips_none_entry() {
        let host = host();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut attributes = Attributes::new();
            let picked = randomize_one_attribute(&host, &mut attributes, "deity", &mut rng);
            assert_eq!(picked.as_deref(), Some("The Creator"));
        }
    }

    #[test]
    fn test_existing_value_is_kept() {
        let host = host();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attributes = Attributes::new();
        attributes.insert("race".into(), "Human".into());

        assert!(randomize_one_attribute(&host, &mut attributes, "race", &mut rng).is_none());
        assert_eq!(attributes.get("race").map(String::as_str), Some("Human"));
    }

    #[test]
    fn test_empty_value_is_filled() {
        let host = host();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attributes = Attributes::new();
        attributes.insert("gender".into(), String::new());

        let picked = randomize_one_attribute(&host, &mut attributes, "gender", &mut rng).unwrap();
        assert!(GENDERS.contains(&picked.as_str()));
    }

    #[test]
    fn test_nothing_registered() {
        let host = host();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attributes = Attributes::new();

        assert!(host.choices("concepts").is_none());
        assert!(randomize_one_attribute(&host, &mut attributes, "concept", &mut rng).is_none());
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_unknown_attribute() {
        let host = host();
        let mut rng = StdRng::seed_from_u64(1);
        let mut attributes = Attributes::new();

        assert!(randomize_one_attribute(&host, &mut attributes, "strength", &mut rng).is_none());
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_every_randomizable_attribute_is_filled() {
        let mut host = host();
        host.add_choice("arcanas", "Magic", "Skill=Spellcasting");
        host.add_choice("concepts", "Scout", "Edge=Woodsman");
        let mut rng = StdRng::seed_from_u64(3);
        let mut attributes = Attributes::new();

        for attribute in RANDOMIZABLE {
            assert!(
                randomize_one_attribute(&host, &mut attributes, attribute, &mut rng).is_some(),
                "{attribute}"
            );
        }
        assert_eq!(attributes.keys().collect::<Vec<_>>(), RANDOMIZABLE.to_vec());
    }

    #[test]
    fn test_same_seed_same_pick() {
        let host = host();
        let pick = |seed| {
            let mut attributes = Attributes::new();
            randomize_one_attribute(&host, &mut attributes, "race", &mut StdRng::seed_from_u64(seed))
        };
        assert_eq!(pick(42), pick(42));
    }
}
