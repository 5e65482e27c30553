use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::error::StoreError;
use crate::model::Cursor;

use super::DocStore;

const CURSOR_PATH: &str = "next-change-id/_doc/0";

#[derive(Debug, Deserialize)]
struct CursorDoc {
    #[serde(rename = "_source")]
    source: Cursor,
}

impl DocStore {
    /// Reads the last persisted cursor, or `None` if this is a fresh index.
    pub async fn read_cursor(&self) -> Result<Option<Cursor>, StoreError> {
        let response = self.request(Method::GET, CURSOR_PATH).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;
        let doc: CursorDoc = response.json().await?;
        Ok(Some(doc.source))
    }

    /// Overwrites the cursor document. Idempotent — the document id is fixed
    /// so replays are no-ops (§4.6).
    pub async fn write_cursor(&self, cursor: &Cursor) -> Result<(), StoreError> {
        let response = self
            .request(Method::PUT, CURSOR_PATH)
            .json(cursor)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
