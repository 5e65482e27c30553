use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::error::StoreError;
use crate::model::{IndexedItem, StashMapping};

use super::DocStore;

#[derive(Debug, Deserialize)]
struct MgetResponse<T> {
    docs: Vec<MgetDoc<T>>,
}

#[derive(Debug, Deserialize)]
struct MgetDoc<T> {
    #[serde(rename = "_id")]
    id: String,
    found: bool,
    #[serde(rename = "_source")]
    source: Option<T>,
}

impl DocStore {
    /// Looks up a batch of item documents by id within one league's index.
    /// Missing ids are simply absent from the result map (§4.4, first
    /// sighting).
    pub async fn mget_items(
        &self,
        league: &str,
        ids: &[String],
    ) -> Result<HashMap<String, IndexedItem>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let index = format!("items-{}", league.to_lowercase());
        self.mget(&index, ids).await
    }

    /// Looks up a batch of `StashMapping`s by stash id.
    pub async fn mget_mappings(
        &self,
        stash_ids: &[String],
    ) -> Result<HashMap<String, StashMapping>, StoreError> {
        if stash_ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.mget("stash-mappings", stash_ids).await
    }

    async fn mget<T: for<'de> Deserialize<'de>>(
        &self,
        index: &str,
        ids: &[String],
    ) -> Result<HashMap<String, T>, StoreError> {
        let path = format!("{index}/_mget");
        let response = self
            .request(Method::GET, &path)
            .json(&json!({ "ids": ids }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let parsed: MgetResponse<T> = response.json().await?;

        Ok(parsed
            .docs
            .into_iter()
            .filter(|doc| doc.found)
            .filter_map(|doc| doc.source.map(|source| (doc.id, source)))
            .collect())
    }
}
