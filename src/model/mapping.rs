use serde::{Deserialize, Serialize};

use super::Timestamp;

/// The last known contents of one stash tab, keyed by the tab's own id.
///
/// Diffing the previous [`StashMapping`] against a freshly formatted stash
/// is how implicit removals are derived: any id present here but absent from
/// the new item list has left the tab (§4.5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashMapping {
    pub stash_id: String,
    pub last_updated: Timestamp,
    pub item_ids: Vec<String>,
}

impl StashMapping {
    pub fn new(stash_id: impl Into<String>, item_ids: Vec<String>) -> Self {
        Self {
            stash_id: stash_id.into(),
            last_updated: Timestamp::now(),
            item_ids,
        }
    }

    /// Ids present in `self` but missing from `current` — items implicitly
    /// removed from this tab since it was last seen.
    pub fn removed_since(&self, current: &[String]) -> Vec<String> {
        self.item_ids
            .iter()
            .filter(|id| !current.contains(id))
            .cloned()
            .collect()
    }
}
