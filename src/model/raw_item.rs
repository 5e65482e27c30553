use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An item exactly as the upstream feed describes it.
///
/// Deserialize-only: this is upstream's shape, warts included. Every field
/// defaults to its empty value on absence — malformed or missing fields must
/// never fail parsing of the surrounding stash (§7(d)).
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "typeLine", default)]
    pub type_line: String,
    #[serde(rename = "baseType", default)]
    pub base_type: String,
    #[serde(default)]
    pub ilvl: i32,
    #[serde(rename = "frameType", default)]
    pub frame_type: u8,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(rename = "inventoryId", default)]
    pub inventory_id: String,
    #[serde(rename = "stackSize")]
    pub stack_size: Option<u32>,
    #[serde(rename = "maxStackSize")]
    pub max_stack_size: Option<u32>,

    #[serde(default)]
    pub identified: bool,
    #[serde(default)]
    pub corrupted: bool,
    #[serde(default)]
    pub duplicated: bool,
    #[serde(default)]
    pub split: bool,
    #[serde(default)]
    pub elder: bool,
    #[serde(default)]
    pub shaper: bool,
    #[serde(default)]
    pub searing: bool,
    #[serde(default)]
    pub tangled: bool,
    #[serde(default)]
    pub synthesised: bool,
    #[serde(default)]
    pub fractured: bool,
    #[serde(rename = "abyssJewel", default)]
    pub abyss_jewel: bool,

    #[serde(default)]
    pub influences: BTreeMap<String, bool>,

    #[serde(default)]
    pub sockets: Vec<Socket>,

    pub note: Option<String>,

    #[serde(rename = "enchantMods", default)]
    pub enchant_mods: Vec<String>,
    #[serde(rename = "implicitMods", default)]
    pub implicit_mods: Vec<String>,
    #[serde(rename = "fracturedMods", default)]
    pub fractured_mods: Vec<String>,
    #[serde(rename = "explicitMods", default)]
    pub explicit_mods: Vec<String>,
    #[serde(rename = "craftedMods", default)]
    pub crafted_mods: Vec<String>,
    #[serde(rename = "veiledMods", default)]
    pub veiled_mods: Vec<String>,
    #[serde(rename = "utilityMods", default)]
    pub utility_mods: Vec<String>,

    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Vec<Property>,
    #[serde(rename = "notableProperties", default)]
    pub notable_properties: Vec<Property>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub requirements: Vec<Property>,
    #[serde(rename = "nextLevelRequirements", default)]
    pub next_level_requirements: Vec<Property>,
}

/// One socket slot. `attr` is upstream's attribute code (`S`/`D`/`I`/`G` for
/// strength/dexterity/intelligence/generic-abyss); `color` is the rendered
/// gem color letter (`R`/`G`/`B`/`W`), present as `sColour` upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    pub group: i32,
    pub attr: String,
    #[serde(rename = "sColour")]
    pub color: Option<String>,
}

/// A property/requirement row: a name and an ordered list of `(text, kind)`
/// value tuples. `kind` mirrors upstream's numeric value-type tag and is
/// otherwise unused downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub values: Vec<(String, i32)>,
    #[serde(rename = "displayMode", default)]
    pub display_mode: i32,
    #[serde(default)]
    pub progress: f32,
}
