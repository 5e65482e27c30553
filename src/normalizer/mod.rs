//! `RawItem -> IndexedItem`. Deterministic and pure apart from the currency
//! lookup, which reads a shared rate map (§4.7).

mod mods;
mod name;
mod price;
mod properties;
mod sockets;

use crate::currency::CurrencyTracker;
use crate::model::{IndexedItem, ModGroups, RawItem, Timestamp};

/// Everything the normalizer needs that isn't carried on the item itself:
/// where it lives, whether it's been seen before, and how to price it.
pub struct NormalizeContext<'a> {
    pub account: String,
    pub stash_id: String,
    pub currency: &'a CurrencyTracker,
    /// `Some` when this item already has a document — preserves `created_at`
    /// across re-sightings and resurrections (§3 invariants).
    pub created_at: Option<Timestamp>,
}

pub fn normalize(raw: &RawItem, ctx: &NormalizeContext<'_>) -> IndexedItem {
    let now = Timestamp::now();
    let (count, links) = sockets::link_topology(&raw.sockets);
    let (price_value, price_currency) =
        price::extract_price(raw.note.as_deref().unwrap_or(""), &raw.inventory_id, ctx.currency);

    let mods = ModGroups {
        enchant: mods::template_all(&raw.enchant_mods),
        implicit: mods::template_all(&raw.implicit_mods),
        fractured: mods::template_all(&raw.fractured_mods),
        explicit: mods::template_all(&raw.explicit_mods),
        crafted: mods::template_all(&raw.crafted_mods),
        veiled: mods::template_all(&raw.veiled_mods),
        utility: mods::template_all(&raw.utility_mods),
    };
    let mod_count = mods.counts();

    IndexedItem {
        id: raw.id.clone(),
        name: name::strip_markers(&raw.name).to_string(),
        type_line: name::strip_markers(&raw.type_line).to_string(),
        base_type: raw.base_type.clone(),
        ilvl: raw.ilvl,
        frame_type: raw.frame_type,
        x: raw.x,
        y: raw.y,
        inventory_id: raw.inventory_id.clone(),
        stack_size: raw.stack_size,
        max_stack_size: raw.max_stack_size,

        identified: raw.identified,
        corrupted: raw.corrupted,
        duplicated: raw.duplicated,
        split: raw.split,
        elder: raw.elder,
        shaper: raw.shaper,
        searing: raw.searing,
        tangled: raw.tangled,
        synthesised: raw.synthesised,
        fractured: raw.fractured,
        abyss_jewel: raw.abyss_jewel,

        influences: raw.influences.clone(),
        sockets: raw.sockets.clone(),
        socket_count: count,
        socket_links: links,

        account: ctx.account.clone(),
        stash_id: ctx.stash_id.clone(),
        created_at: ctx.created_at.unwrap_or(now),
        last_updated: now,
        removed_at: None,

        price_value,
        price_currency,

        mods,
        mod_count,

        additional_properties: properties::flatten(&raw.additional_properties),
        notable_properties: properties::flatten(&raw.notable_properties),
        properties: properties::flatten(&raw.properties),
        requirements: properties::flatten(&raw.requirements),
        next_level_requirements: properties::flatten(&raw.next_level_requirements),
    }
}
