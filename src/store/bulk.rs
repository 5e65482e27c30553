use std::io::Write;
use std::time::Duration;

use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::Method;
use serde_json::json;

use crate::error::StoreError;
use crate::model::{FormattedStash, ItemRemoval, StashMapping, Timestamp};

use super::DocStore;

const MAPPING_INDEX: &str = "stash-mappings";

/// Bulk writes get more time than a point lookup — a compressed page of
/// creates/updates/deletes can legitimately take longer than 10s.
pub(crate) const BULK_TIMEOUT: Duration = Duration::from_secs(30);

fn items_index(league: &str) -> String {
    format!("items-{}", league.to_lowercase())
}

/// Builds the ND-JSON body for one Persist bulk request: removal updates,
/// item upserts, and mapping rewrites, in that order (§4.5). Order within
/// the request is otherwise insignificant — ids are globally unique.
pub fn build_body(stashes: &[FormattedStash], deletes: &[ItemRemoval]) -> String {
    let now = Timestamp::now();
    let mut body = String::new();

    for delete in deletes {
        let meta = json!({"update": {"_index": items_index(&delete.league), "_id": delete.item_id}});
        let doc = json!({"doc": {"removed_at": now.to_fixed_string()}});
        body.push_str(&meta.to_string());
        body.push('\n');
        body.push_str(&doc.to_string());
        body.push('\n');
    }

    for stash in stashes {
        let index = items_index(&stash.league);
        for item in &stash.items {
            let meta = json!({"index": {"_index": index, "_id": item.id}});
            body.push_str(&meta.to_string());
            body.push('\n');
            body.push_str(&serde_json::to_string(item).unwrap_or_default());
            body.push('\n');
        }

        let mapping = StashMapping {
            stash_id: stash.stash_id.clone(),
            last_updated: now,
            item_ids: stash.item_ids.clone(),
        };
        let meta = json!({"index": {"_index": MAPPING_INDEX, "_id": stash.stash_id}});
        body.push_str(&meta.to_string());
        body.push('\n');
        body.push_str(&serde_json::to_string(&mapping).unwrap_or_default());
        body.push('\n');
    }

    body
}

fn gzip(body: &str) -> Result<Vec<u8>, StoreError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body.as_bytes())?;
    Ok(encoder.finish()?)
}

impl DocStore {
    /// Sends a single compressed bulk request. On any non-2xx response the
    /// raw (uncompressed) body is returned alongside the error so the caller
    /// can write it to disk for post-mortem (§4.5).
    pub async fn bulk(
        &self,
        stashes: &[FormattedStash],
        deletes: &[ItemRemoval],
    ) -> Result<(), (StoreError, String)> {
        if stashes.is_empty() && deletes.is_empty() {
            return Ok(());
        }

        let body = build_body(stashes, deletes);
        let compressed = match gzip(&body) {
            Ok(c) => c,
            Err(e) => return Err((e, body)),
        };

        let response = self
            .request(Method::POST, "_bulk")
            .timeout(BULK_TIMEOUT)
            .header("Content-Type", "application/x-ndjson")
            .header("Content-Encoding", "gzip")
            .body(compressed)
            .send()
            .await;

        match response {
            Ok(resp) => match Self::check_status(resp).await {
                Ok(_) => Ok(()),
                Err(e) => Err((e, body)),
            },
            Err(e) => Err((StoreError::Request(e), body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IndexedItem;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn sample_item(id: &str) -> IndexedItem {
        IndexedItem {
            id: id.to_string(),
            name: "Test Item".to_string(),
            type_line: "Test Item".to_string(),
            base_type: "Test Item".to_string(),
            ilvl: 1,
            frame_type: 0,
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
            influences: BTreeMap::new(),
            sockets: Vec::new(),
            socket_count: 0,
            socket_links: 0,
            account: "acct".to_string(),
            stash_id: "stash-1".to_string(),
            created_at: Timestamp::now(),
            last_updated: Timestamp::now(),
            removed_at: None,
            price_value: Decimal::ZERO,
            price_currency: String::new(),
            mods: Default::default(),
            mod_count: BTreeMap::new(),
            additional_properties: BTreeMap::new(),
            notable_properties: BTreeMap::new(),
            properties: BTreeMap::new(),
            requirements: BTreeMap::new(),
            next_level_requirements: BTreeMap::new(),
        }
    }

    #[test]
    fn builds_one_meta_doc_pair_per_operation() {
        let stash = FormattedStash {
            stash_id: "stash-1".to_string(),
            account_name: "acct".to_string(),
            league: "Harbinger".to_string(),
            item_ids: vec!["item-1".to_string()],
            items: vec![sample_item("item-1")],
        };
        let deletes = vec![ItemRemoval {
            stash_id: "stash-2".to_string(),
            item_id: "item-2".to_string(),
            league: "Harbinger".to_string(),
        }];

        let body = build_body(&[stash], &deletes);
        let lines: Vec<&str> = body.lines().collect();
        // 1 delete (2 lines) + 1 item (2 lines) + 1 mapping (2 lines)
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("\"update\""));
        assert!(lines[2].contains("items-harbinger"));
        assert!(lines[4].contains("stash-mappings"));
    }

    #[test]
    fn an_empty_page_builds_no_operations() {
        assert_eq!(build_body(&[], &[]), "");
    }
}
