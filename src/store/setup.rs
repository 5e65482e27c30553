use reqwest::{Method, StatusCode};
use serde_json::json;

use crate::error::StoreError;

use super::DocStore;

const MAPPING_INDEX: &str = "stash-mappings";

impl DocStore {
    /// Creates the `stash-mappings` index with source indexing disabled, if
    /// it doesn't already exist. Item indices are created lazily per league
    /// on first write — leagues aren't known ahead of time — relying on the
    /// store's default dynamic-mapping behavior.
    pub async fn ensure_indices(&self) -> Result<(), StoreError> {
        let exists = self
            .request(Method::HEAD, MAPPING_INDEX)
            .send()
            .await?
            .status()
            == StatusCode::OK;

        if !exists {
            let response = self
                .request(Method::PUT, MAPPING_INDEX)
                .json(&json!({ "mappings": { "enabled": false } }))
                .send()
                .await?;
            Self::check_status(response).await?;
        }

        Ok(())
    }
}
