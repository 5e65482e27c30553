use serde::Deserialize;

use super::RawItem;

/// A stash tab exactly as the upstream feed describes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStash {
    #[serde(rename = "accountName", default)]
    pub account_name: String,
    #[serde(rename = "lastCharacterName", default)]
    pub last_character_name: String,
    pub id: String,
    /// The stash tab's own name — may itself carry a buyout tag.
    #[serde(default)]
    pub stash: String,
    #[serde(rename = "stashType", default)]
    pub stash_type: String,
    #[serde(default)]
    pub league: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub items: Vec<RawItem>,
}
