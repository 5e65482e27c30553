use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::raw_item::Socket;
use super::Timestamp;

/// One numeric-templated mod line: `text` has every matched number replaced
/// by `#` in first-occurrence order, `values` holds the extracted numbers in
/// that same order, and `average` is populated only when more than one value
/// was found (§4.7).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModEntry {
    pub text: String,
    pub values: Vec<f64>,
    pub average: Option<f64>,
}

/// The seven mod lists a `RawItem` carries, each templated independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModGroups {
    #[serde(default)]
    pub enchant: Vec<ModEntry>,
    #[serde(default)]
    pub implicit: Vec<ModEntry>,
    #[serde(default)]
    pub fractured: Vec<ModEntry>,
    #[serde(default)]
    pub explicit: Vec<ModEntry>,
    #[serde(default)]
    pub crafted: Vec<ModEntry>,
    #[serde(default)]
    pub veiled: Vec<ModEntry>,
    #[serde(default)]
    pub utility: Vec<ModEntry>,
}

impl ModGroups {
    /// Entry counts per category, as stored in `IndexedItem::mod_count`.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        [
            ("enchant", self.enchant.len()),
            ("implicit", self.implicit.len()),
            ("fractured", self.fractured.len()),
            ("explicit", self.explicit.len()),
            ("crafted", self.crafted.len()),
            ("veiled", self.veiled.len()),
            ("utility", self.utility.len()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

/// A single flattened property value: a number, free text, or (for
/// multi-value properties) the first element of each value tuple in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// `RawItem → IndexedItem`'s destination: the document this crate upserts
/// into the `items-<league>` index. Carries every RawItem identity/flag
/// field plus the fields the normalizer derives (§3, §4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedItem {
    pub id: String,
    pub name: String,
    pub type_line: String,
    pub base_type: String,
    pub ilvl: i32,
    pub frame_type: u8,
    pub x: i32,
    pub y: i32,
    pub inventory_id: String,
    pub stack_size: Option<u32>,
    pub max_stack_size: Option<u32>,

    pub identified: bool,
    pub corrupted: bool,
    pub duplicated: bool,
    pub split: bool,
    pub elder: bool,
    pub shaper: bool,
    pub searing: bool,
    pub tangled: bool,
    pub synthesised: bool,
    pub fractured: bool,
    pub abyss_jewel: bool,

    pub influences: BTreeMap<String, bool>,
    pub sockets: Vec<Socket>,
    pub socket_count: u32,
    pub socket_links: u32,

    pub account: String,
    pub stash_id: String,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
    pub removed_at: Option<Timestamp>,

    pub price_value: Decimal,
    pub price_currency: String,

    pub mods: ModGroups,
    pub mod_count: BTreeMap<String, usize>,

    pub additional_properties: BTreeMap<String, PropertyValue>,
    pub notable_properties: BTreeMap<String, PropertyValue>,
    pub properties: BTreeMap<String, PropertyValue>,
    pub requirements: BTreeMap<String, PropertyValue>,
    pub next_level_requirements: BTreeMap<String, PropertyValue>,
}

impl IndexedItem {
    /// `socket_links <= socket_count` must hold for every item (§3 invariants).
    pub fn socket_links_within_bounds(&self) -> bool {
        self.socket_links <= self.socket_count
    }
}
