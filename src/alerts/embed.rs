use serde::Serialize;
use serde_json::{json, Value};

use crate::model::IndexedItem;

#[derive(Debug, Serialize)]
pub struct DiscordEmbed {
    #[serde(skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<EmbedField>,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
    #[serde(skip_serializing_if = "is_false")]
    inline: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn field(name: &str, value: impl Into<String>) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: value.into(),
        inline: false,
    }
}

fn flag(name: &str) -> EmbedField {
    EmbedField {
        name: name.to_string(),
        value: "\u{200b}".to_string(),
        inline: false,
    }
}

fn mod_field(name: &str, lines: &[crate::model::ModEntry]) -> Option<EmbedField> {
    if lines.is_empty() {
        return None;
    }
    let joined = lines
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Some(field(name, joined))
}

/// Builds one embed per the shape `discord_alerts.go` sends: title/description
/// fall back from name+note to type-line+note when the item has no name,
/// mod-list fields per category, flag badges, then a links/sockets pair.
pub fn build(item: &IndexedItem) -> DiscordEmbed {
    // `IndexedItem` carries the resolved chaos price rather than the raw
    // note string the original embedded verbatim — the price line serves
    // the same "what did this sell for" purpose in the description.
    let price_line = format!("{} chaos", item.price_value);
    let (title, description) = if item.name.is_empty() {
        (item.type_line.clone(), price_line)
    } else {
        (item.name.clone(), format!("{}\n{}", item.type_line, price_line))
    };

    let mut fields = Vec::new();
    if let Some(f) = mod_field("Enchant Mods", &item.mods.enchant) {
        fields.push(f);
    }
    if let Some(f) = mod_field("Implicit Mods", &item.mods.implicit) {
        fields.push(f);
    }
    if let Some(f) = mod_field("Explicit Mods", &item.mods.explicit) {
        fields.push(f);
    }
    if let Some(f) = mod_field("Crafted Mods", &item.mods.crafted) {
        fields.push(f);
    }
    if let Some(f) = mod_field("Utility Mods", &item.mods.utility) {
        fields.push(f);
    }

    for (influence, set) in item.influences.iter() {
        if *set {
            fields.push(flag(&title_case(influence)));
        }
    }

    for (flag_name, set) in [
        ("Synthesised", item.synthesised),
        ("Fractured", item.fractured),
        ("Duplicated", item.duplicated),
        ("Split", item.split),
        ("Searing", item.searing),
        ("Tangled", item.tangled),
        ("Corrupted", item.corrupted),
    ] {
        if set {
            fields.push(flag(flag_name));
        }
    }
    if !item.identified {
        fields.push(flag("Unidentified"));
    }

    if !item.sockets.is_empty() {
        fields.push(EmbedField {
            name: "Links".to_string(),
            value: item.socket_links.to_string(),
            inline: true,
        });
        fields.push(EmbedField {
            name: "Sockets".to_string(),
            value: item.socket_count.to_string(),
            inline: true,
        });
    }

    DiscordEmbed {
        title,
        description,
        fields,
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Wraps a batch of embeds in the webhook body shape the bot posts under.
pub fn payload(embeds: &[DiscordEmbed]) -> Value {
    json!({
        "username": "item-knower",
        "avatar_url": "https://cdn.discordapp.com/app-icons/252665923981279232/926103f5ca846a96664478d71a2de821.png",
        "embeds": embeds,
    })
}
