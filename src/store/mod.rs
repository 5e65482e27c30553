//! A thin REST client over the document store (an Elasticsearch-like
//! document index). Every method builds on [`DocStore::request`], which
//! centralizes base-URL joining, basic auth, and status-code handling.

pub mod bulk;
pub mod cursor_store;
pub mod liveness;
pub mod mget;
pub mod search;
pub mod setup;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};

use crate::config::Config;
use crate::error::StoreError;

/// Default per-request timeout. Bulk writes override this with a longer one
/// (`bulk::BULK_TIMEOUT`) since a compressed page can take noticeably longer
/// than a point lookup.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct DocStore {
    client: reqwest::Client,
    base_url: String,
    auth: Option<(String, Option<String>)>,
}

impl DocStore {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        let base_url = config.es_url.trim_end_matches('/').to_string();
        let auth = config
            .basic_auth()
            .map(|(user, pass)| (user.to_string(), pass.map(str::to_string)));
        Self {
            client,
            base_url,
            auth,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self
            .client
            .request(method, url)
            .timeout(DEFAULT_TIMEOUT);
        match &self.auth {
            Some((user, pass)) => builder.basic_auth(user, pass.clone()),
            None => builder,
        }
    }

    pub(crate) async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Status { status, body })
        }
    }
}
