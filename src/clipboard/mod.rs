//! Parses the plain-text format the game client puts on the clipboard when
//! a player copies an item (`Ctrl+C` over an item in the in-game UI), into a
//! [`RawItem`]. Pure and synchronous — no I/O, never panics on malformed
//! input (§4.10). Grounded in the original `chatbot.go`'s `parseClipboardItem`.

mod rarity;
mod sections;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ClipboardError;
use crate::model::{RawItem, Socket};

const SECTION_DELIMITER: &str = "--------";
const SET_MARKER_PREFIX: &str = "<<set:MS>><<set:M>><<set:S>>";

static SOCKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Sockets: (.+\S)").unwrap());
static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+): [+-]?(\d+\.?\d*(?:-\d+\.?\d*)?)%?,? ?(\d+\.?\d*(?:-\d+\.?\d*)?)?").unwrap()
});
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*").unwrap());

pub fn parse_clipboard_item(raw: &str) -> Result<RawItem, ClipboardError> {
    let sections: Vec<&str> = raw.split(SECTION_DELIMITER).collect();
    let cleaned = raw.replace(" (augmented)", "");

    let (frame_type, type_line) = rarity::parse_header(sections[0])?;

    let sockets = parse_sockets(&cleaned);

    let mut bag = sections::PropertyBag::scan(&PROPERTY, &cleaned);

    let ilvl = bag.take_item_level()?;
    let requirements = bag.take_requirements();
    let properties = bag.remaining_properties();

    let mut item = RawItem {
        id: String::new(),
        name: String::new(),
        type_line,
        base_type: String::new(),
        ilvl,
        frame_type,
        x: 0,
        y: 0,
        inventory_id: String::new(),
        stack_size: None,
        max_stack_size: None,
        identified: true,
        corrupted: false,
        duplicated: false,
        split: false,
        elder: false,
        shaper: false,
        searing: false,
        tangled: false,
        synthesised: false,
        fractured: false,
        abyss_jewel: false,
        influences: Default::default(),
        sockets,
        note: None,
        enchant_mods: Vec::new(),
        implicit_mods: Vec::new(),
        fractured_mods: Vec::new(),
        explicit_mods: Vec::new(),
        crafted_mods: Vec::new(),
        veiled_mods: Vec::new(),
        utility_mods: Vec::new(),
        additional_properties: Vec::new(),
        notable_properties: Vec::new(),
        properties,
        requirements,
        next_level_requirements: Vec::new(),
    };

    sections::parse_tail(&mut item, &sections, &bag);

    Ok(item)
}

fn parse_sockets(cleaned: &str) -> Vec<Socket> {
    let Some(caps) = SOCKETS.captures(cleaned) else {
        return Vec::new();
    };

    caps[1]
        .split(' ')
        .enumerate()
        .flat_map(|(group, letters)| {
            letters
                .split('-')
                .filter(|letter| !letter.is_empty())
                .map(move |letter| Socket {
                    group: group as i32,
                    attr: rarity::socket_attr(letter).to_string(),
                    color: Some(letter.to_string()),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BELLY_OF_THE_BEAST: &str = "Rarity: Unique
Belly of the Beast
Full Wyrmscale
--------
Quality: +20% (augmented)
Armour: 541 (augmented)
Evasion Rating: 217 (augmented)
--------
Requirements:
Level: 46
Str: 68 (unmet)
Dex: 68 (unmet)
--------
Sockets: B-B-G-R-G-B
--------
Item Level: 75
--------
+1 to Level of Socketed Gems
--------
179% increased Armour
38% increased maximum Life
+11% to all Elemental Resistances
50% increased Flask Life Recovery rate
Extra gore
--------
There is no safer place
Than the Belly of the Beast
--------
Corrupted";

    #[test]
    fn parses_the_belly_of_the_beast_fixture() {
        let item = parse_clipboard_item(BELLY_OF_THE_BEAST).unwrap();

        assert_eq!(item.ilvl, 75);
        assert!(item.corrupted);
        assert_eq!(item.frame_type, 3);
        assert_eq!(item.type_line, "Full Wyrmscale");

        assert_eq!(item.sockets.len(), 6);
        assert_eq!(item.sockets[0].color.as_deref(), Some("B"));

        assert_eq!(
            item.implicit_mods,
            vec!["+1 to Level of Socketed Gems".to_string()]
        );
        assert_eq!(
            item.explicit_mods,
            vec![
                "179% increased Armour".to_string(),
                "38% increased maximum Life".to_string(),
                "+11% to all Elemental Resistances".to_string(),
                "50% increased Flask Life Recovery rate".to_string(),
                "Extra gore".to_string(),
            ]
        );

        let req_names: Vec<&str> = item.requirements.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(req_names, vec!["Dex", "Level", "Str"]);

        let prop_names: Vec<&str> = item.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(prop_names, vec!["Armour", "Evasion Rating", "Quality"]);
    }

    #[test]
    fn parses_a_rare_bow_with_multi_value_elemental_damage() {
        let raw = "Rarity: Rare
Fate Thunder
Harbinger Bow
--------
Bow
Quality: +20% (augmented)
Physical Damage: 77-201 (augmented)
Elemental Damage: 34-74 (augmented), 23-38 (augmented)
Critical Strike Chance: 7.70% (augmented)
Attacks per Second: 1.20
--------
Requirements:
Level: 68
Dex: 212 (unmet)
--------
Sockets: G-G G
--------
Item Level: 69
--------
31% increased Critical Strike Chance
--------
101% increased Physical Damage
Adds 34 to 74 Fire Damage
Adds 23 to 38 Cold Damage
23% increased Critical Strike Chance";

        let item = parse_clipboard_item(raw).unwrap();
        assert_eq!(item.ilvl, 69);
        assert_eq!(item.type_line, "Harbinger Bow");
        assert_eq!(item.sockets.len(), 3);

        let elemental = item
            .properties
            .iter()
            .find(|p| p.name == "Elemental Damage")
            .unwrap();
        assert_eq!(elemental.values.len(), 2);
        assert_eq!(elemental.values[0].0, "34-74");
        assert_eq!(elemental.values[1].0, "23-38");
    }

    #[test]
    fn rejects_text_with_no_rarity_line() {
        let err = parse_clipboard_item("not an item at all").unwrap_err();
        assert!(matches!(err, ClipboardError::MissingRarity));
    }

    #[test]
    fn rejects_an_unrecognized_rarity() {
        let err = parse_clipboard_item("Rarity: Mythic\nSome Item").unwrap_err();
        assert!(matches!(err, ClipboardError::UnknownRarity(_)));
    }
}
