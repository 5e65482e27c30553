//! Expensive-sold-item alert side-car: every 60s, looks for items priced at
//! 1270 chaos or more that were removed in the last minute, and posts a
//! Discord embed per item. Peripheral to the ingest pipeline — its own
//! failures are logged, never fatal. Grounded in `original_source/discord_alerts.go`.

mod embed;

use std::collections::HashSet;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::AlertError;
use crate::model::Timestamp;
use crate::store::DocStore;

const POLL_INTERVAL: Duration = Duration::from_secs(60);
const MIN_CHAOS_PRICE: i64 = 1270;

pub struct Args {
    pub cx: CancellationToken,
    pub store: DocStore,
    pub discord_hook: String,
    pub client: reqwest::Client,
}

/// Runs forever until cancelled, deduplicating alerted item ids for the
/// lifetime of the process (a restart may re-alert, which is acceptable —
/// the source data is authoritative, not this dedup set).
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) {
    let Args {
        cx,
        store,
        discord_hook,
        client,
    } = args;

    let mut seen = HashSet::new();

    loop {
        tokio::select! {
            _ = cx.cancelled() => {
                info!("alert loop cancelled");
                return;
            }
            _ = tokio::time::sleep(POLL_INTERVAL) => {
                if let Err(e) = tick(&store, &client, &discord_hook, &mut seen).await {
                    error!(error = %e, "expensive-sold alert tick failed");
                }
            }
        }
    }
}

async fn tick(
    store: &DocStore,
    client: &reqwest::Client,
    discord_hook: &str,
    seen: &mut HashSet<String>,
) -> Result<(), AlertError> {
    let since =
        Timestamp::from((chrono::Local::now() - chrono::Duration::minutes(1)).fixed_offset());
    let items = store
        .search_expensive_sold(since, Decimal::from(MIN_CHAOS_PRICE))
        .await?;

    let fresh: Vec<_> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if fresh.is_empty() {
        return Ok(());
    }

    let embeds: Vec<_> = fresh.iter().map(embed::build).collect();
    let payload = embed::payload(&embeds);

    let response = client.post(discord_hook).json(&payload).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(%status, "discord webhook rejected alert batch, logging request body to disk");
        if let Err(write_err) = std::fs::write("discord_req.json", serde_json::to_vec(&payload)?) {
            error!(error = %write_err, "failed to write post-mortem discord request body");
        }
        return Err(AlertError::WebhookRejected { status, body });
    }

    Ok(())
}
