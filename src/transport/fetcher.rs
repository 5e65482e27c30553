use std::time::{Duration, Instant};

use async_channel::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::UpstreamError;
use crate::model::Page;
use crate::store::DocStore;

const UPSTREAM_URL: &str = "http://api.pathofexile.com/public-stash-tabs";
const ERROR_BACKOFF: Duration = Duration::from_secs(10);

#[derive(serde::Deserialize)]
struct UpstreamResponse {
    next_change_id: String,
    #[serde(default)]
    stashes: Vec<crate::model::RawStash>,
}

pub struct Args {
    pub cx: CancellationToken,
    pub tx: Sender<Page>,
    pub client: reqwest::Client,
    pub store: DocStore,
    pub rate_limit: Duration,
    pub starting_cursor: String,
}

async fn fetch_page(
    client: &reqwest::Client,
    cursor: &str,
) -> Result<(String, Vec<crate::model::RawStash>), UpstreamError> {
    let response = client
        .get(UPSTREAM_URL)
        .query(&[("id", cursor)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(UpstreamError::Status(response.status()));
    }

    let parsed: UpstreamResponse = response.json().await?;
    Ok((parsed.next_change_id, parsed.stashes))
}

/// Endlessly emits `Page{next_id, stashes}` starting from `starting_cursor`.
/// Paces itself to `rate_limit`; on an empty page (river caught up) it
/// additionally posts a liveness heartbeat. A failed fetch backs off 10s
/// before retrying, rather than the usual rate-limit pacing (§7a);
/// `current_id` only updates once a page has been handed to the channel
/// (§4.3).
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) {
    let Args {
        cx,
        tx,
        client,
        store,
        rate_limit,
        starting_cursor,
    } = args;

    let mut current_id = starting_cursor;

    while !cx.is_cancelled() {
        let start = Instant::now();

        match fetch_page(&client, &current_id).await {
            Ok((next_id, stashes)) => {
                if stashes.is_empty() {
                    info!("caught up with upstream feed, waiting for updates");
                    if let Err(e) = store.heartbeat().await {
                        warn!(error = %e, "failed to post liveness heartbeat");
                    }
                    sleep_remainder(start, rate_limit).await;
                    continue;
                }

                let page = Page {
                    next_id: next_id.clone(),
                    stashes,
                };

                if tx.send(page).await.is_err() {
                    break;
                }
                current_id = next_id;
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch upstream page, backing off");
                tokio::time::sleep(ERROR_BACKOFF).await;
                continue;
            }
        }

        sleep_remainder(start, rate_limit).await;
    }
}

async fn sleep_remainder(start: Instant, rate_limit: Duration) {
    let elapsed = start.elapsed();
    if elapsed < rate_limit {
        tokio::time::sleep(rate_limit - elapsed).await;
    }
}
