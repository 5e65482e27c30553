//! Process entrypoint: loads configuration, ensures the document store's
//! indices exist, then runs the ingest pipeline alongside the currency
//! tracker and (if configured) the expensive-sold alert side-car until
//! interrupted.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stashriver::alerts;
use stashriver::config::Config;
use stashriver::currency::CurrencyTracker;
use stashriver::pipeline::Pipeline;
use stashriver::store::DocStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stashriver=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration, exiting");
            std::process::exit(1);
        }
    };

    let client = reqwest::Client::new();
    let store = DocStore::new(&config, client.clone());

    if let Err(e) = store.ensure_indices().await {
        error!(error = %e, "failed to ensure document store indices exist, exiting");
        std::process::exit(1);
    }

    let cx = CancellationToken::new();
    let currency = Arc::new(CurrencyTracker::new(client.clone()));

    let shutdown = cx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received shutdown signal, cancelling all stages");
            shutdown.cancel();
        }
    });

    let currency_task = tokio::spawn({
        let currency = currency.clone();
        async move { currency.run().await }
    });

    let alert_task = config.discord_hook.clone().map(|discord_hook| {
        let args = alerts::Args {
            cx: cx.child_token(),
            store: store.clone(),
            discord_hook,
            client: client.clone(),
        };
        tokio::spawn(alerts::run(args))
    });

    let pipeline = Pipeline {
        cx: cx.clone(),
        client,
        store,
        currency,
        rate_limit: config.rate_limit,
    };

    if let Err(e) = pipeline.run().await {
        error!(error = %e, "pipeline exited with an error");
        cx.cancel();
        std::process::exit(1);
    }

    currency_task.abort();
    if let Some(task) = alert_task {
        task.abort();
    }
}
