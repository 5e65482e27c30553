//! Wire and index types for the stash feed.
//!
//! [`raw_item`] and [`stash`] mirror the upstream JSON exactly (serde
//! `Deserialize` only). [`indexed_item`], [`mapping`], and [`cursor`] are the
//! documents this crate writes into the store.

pub mod cursor;
pub mod indexed_item;
pub mod mapping;
pub mod page;
pub mod raw_item;
pub mod stash;
pub mod timestamp;

pub use cursor::Cursor;
pub use indexed_item::{IndexedItem, ModEntry, ModGroups, PropertyValue};
pub use mapping::StashMapping;
pub use page::{FormattedStash, ItemRemoval, Page, Update};
pub use raw_item::{Property, RawItem, Socket};
pub use stash::RawStash;
pub use timestamp::Timestamp;
