use super::{IndexedItem, RawStash};

/// One page of the upstream feed: the stashes modified since `next_id`'s
/// predecessor cursor, plus the cursor to resume from if this page is lost.
#[derive(Debug, Clone)]
pub struct Page {
    pub next_id: String,
    pub stashes: Vec<RawStash>,
}

/// A stash tab after league filtering and normalization, still attached to
/// its ordered item-id list — the list diffing needs to detect removals and
/// the mapping rewrite needs to persist.
#[derive(Debug, Clone)]
pub struct FormattedStash {
    pub stash_id: String,
    pub account_name: String,
    pub league: String,
    pub item_ids: Vec<String>,
    pub items: Vec<IndexedItem>,
}

/// One item that left a stash tab between snapshots. `league` travels with
/// it so Persist can target the same `items-<league>` index the item was
/// originally upserted into.
#[derive(Debug, Clone)]
pub struct ItemRemoval {
    pub stash_id: String,
    pub item_id: String,
    pub league: String,
}

/// The single record that travels the pipeline's bounded channels, start to
/// finish. `filtered_stashes` is what Format produced from one page;
/// `deletes` is filled in by Diff. Persist consumes both together and
/// Cursor-Advance only needs `cursor_id`.
#[derive(Debug, Clone)]
pub struct Update {
    pub cursor_id: String,
    pub filtered_stashes: Vec<FormattedStash>,
    pub deletes: Vec<ItemRemoval>,
}

impl Update {
    pub fn new(cursor_id: impl Into<String>) -> Self {
        Self {
            cursor_id: cursor_id.into(),
            filtered_stashes: Vec::new(),
            deletes: Vec::new(),
        }
    }
}
