//! Chaos-orb-equivalent currency tracking.
//!
//! Grounded in the original's `currency.go`: an hourly-refreshed rate map
//! seeded with the numeraire (Chaos Orb == 1.0) behind a reader/writer lock,
//! plus a fixed alias table mapping the many ways players misspell or
//! abbreviate a currency name onto its canonical one.

mod alias;

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::UpstreamError;

const RATE_ENDPOINT: &str = "https://poe.ninja/api/Data/GetCurrencyOverview?league=Standard";
const REFRESH_INTERVAL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct CurrencyOverview {
    #[serde(default)]
    lines: Vec<CurrencyLine>,
}

#[derive(Debug, Deserialize)]
struct CurrencyLine {
    #[serde(rename = "currencyTypeName")]
    currency_type_name: String,
    #[serde(rename = "chaosEquivalent")]
    chaos_equivalent: Decimal,
}

/// Shared, hot-reloadable map from canonical currency name to chaos-orb value.
pub struct CurrencyTracker {
    rates: RwLock<HashMap<String, Decimal>>,
    client: reqwest::Client,
}

impl CurrencyTracker {
    pub fn new(client: reqwest::Client) -> Self {
        let mut rates = HashMap::new();
        rates.insert("Chaos Orb".to_string(), Decimal::ONE);
        Self {
            rates: RwLock::new(rates),
            client,
        }
    }

    /// Resolves a buyout's currency tag (already lowercased by the caller's
    /// regex match) to `(rate, canonical_name)`, or `None` if the tag is
    /// unknown or its currency has never been quoted.
    pub fn resolve(&self, tag: &str) -> Option<(Decimal, String)> {
        let canonical = alias::canonicalize(tag)?;
        let rates = self.rates.read().expect("currency rate lock poisoned");
        rates
            .get(canonical)
            .map(|rate| (*rate, canonical.to_string()))
    }

    #[tracing::instrument(skip_all)]
    async fn refresh(&self) -> Result<(), UpstreamError> {
        let overview: CurrencyOverview = self
            .client
            .get(RATE_ENDPOINT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut rates = self.rates.write().expect("currency rate lock poisoned");
        for line in overview.lines {
            rates.insert(line.currency_type_name, line.chaos_equivalent);
        }
        if let Some(exalted) = rates.get("Exalted Orb") {
            info!(exalted = %exalted, "refreshed currency rates");
        }
        Ok(())
    }

    /// Runs forever, refreshing the rate map once an hour. Errors are logged
    /// and swallowed — a stale rate map degrades pricing, it doesn't stop
    /// ingestion.
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.refresh().await {
                warn!(error = %e, "failed to refresh currency rates");
            }
            tokio::time::sleep(REFRESH_INTERVAL).await;
        }
    }
}
