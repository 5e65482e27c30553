use reqwest::Method;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::error::StoreError;
use crate::model::{IndexedItem, Timestamp};

use super::DocStore;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_source")]
    source: IndexedItem,
}

impl DocStore {
    /// Items removed since `since` at or above `min_chaos_price` (itself
    /// already chaos-equivalent — the normalizer resolves `price_value` to
    /// chaos at write time), across every league's index. Used by the
    /// expensive-sold alert side-car.
    pub async fn search_expensive_sold(
        &self,
        since: Timestamp,
        min_chaos_price: Decimal,
    ) -> Result<Vec<IndexedItem>, StoreError> {
        let query = json!({
            "query": {
                "bool": {
                    "must": [
                        { "range": { "removed_at": { "gte": since.to_fixed_string() } } },
                        { "range": { "price_value": { "gte": min_chaos_price } } },
                    ]
                }
            }
        });

        let response = self
            .request(Method::GET, "items-*/_search")
            .json(&query)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let parsed: SearchResponse = response.json().await?;

        Ok(parsed.hits.hits.into_iter().map(|h| h.source).collect())
    }
}
