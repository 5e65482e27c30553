use reqwest::Method;
use serde_json::json;

use crate::error::StoreError;
use crate::model::Timestamp;

use super::DocStore;

impl DocStore {
    /// Posts a heartbeat document, used by the Fetcher while the upstream
    /// feed has caught up and there's nothing to persist (§4.3).
    pub async fn heartbeat(&self) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, "liveness-log/_doc/")
            .json(&json!({ "@timestamp": Timestamp::now().to_fixed_string() }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
