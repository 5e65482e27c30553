use serde::{Deserialize, Serialize};

/// The document store's record of how far the upstream feed has been consumed.
///
/// Written only after a page's items and removals have been persisted
/// successfully — never ahead of the data it describes (§4.6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub next_change_id: String,
}

impl Cursor {
    pub fn new(next_change_id: impl Into<String>) -> Self {
        Self {
            next_change_id: next_change_id.into(),
        }
    }
}
