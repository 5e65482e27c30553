//! Fetcher -> Format -> Lookup -> Diff -> Persist -> Cursor-Advance.
//!
//! Each stage is one cooperative worker on a bounded `async_channel`
//! (capacity ~4, for backpressure); Lookup and Persist additionally fan out
//! internally across 8 ephemeral workers per page. Modeled on the
//! generator/fetcher/processor/collector skeleton this crate's ancestor used
//! for its own streaming batch loader.

mod cursor_advance;
mod drain;
pub mod diff;
pub mod format;
pub mod lookup;
pub mod persist;

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::currency::CurrencyTracker;
use crate::error::StashRiverResult;
use crate::model::Page;
use crate::store::DocStore;
use crate::transport::fetcher;

use drain::TryDrain;

const CHANNEL_CAPACITY: usize = 4;

pub struct Pipeline {
    pub cx: CancellationToken,
    pub client: reqwest::Client,
    pub store: DocStore,
    pub currency: Arc<CurrencyTracker>,
    pub rate_limit: std::time::Duration,
}

impl Pipeline {
    /// Runs every stage until cancelled or a stage fails. Recovers the
    /// starting cursor from the store (replaying from scratch if none has
    /// ever been written).
    pub async fn run(self) -> StashRiverResult<()> {
        let Pipeline {
            cx,
            client,
            store,
            currency,
            rate_limit,
        } = self;

        let starting_cursor = store
            .read_cursor()
            .await?
            .map(|c| c.next_change_id)
            .unwrap_or_default();

        let (page_tx, page_rx) = async_channel::bounded::<Page>(CHANNEL_CAPACITY);
        let (formatted_tx, formatted_rx) = async_channel::bounded(CHANNEL_CAPACITY);
        let (looked_up_tx, looked_up_rx) = async_channel::bounded(CHANNEL_CAPACITY);
        let (diffed_tx, diffed_rx) = async_channel::bounded(CHANNEL_CAPACITY);
        let (persisted_tx, persisted_rx) = async_channel::bounded(CHANNEL_CAPACITY);

        let mut fetcher_task = JoinSet::new();
        let fetcher_args = fetcher::Args {
            cx: cx.clone(),
            tx: page_tx,
            client: client.clone(),
            store: store.clone(),
            rate_limit,
            starting_cursor,
        };
        fetcher_task.spawn(async move {
            fetcher::run(fetcher_args).await;
            Ok(())
        });

        let mut format_task = JoinSet::new();
        format_task.spawn(format::run(format::Args {
            cx: cx.clone(),
            rx: page_rx,
            tx: formatted_tx,
            currency: currency.clone(),
        }));

        let mut lookup_task = JoinSet::new();
        lookup_task.spawn(lookup::run(lookup::Args {
            cx: cx.clone(),
            rx: formatted_rx,
            tx: looked_up_tx,
            store: store.clone(),
        }));

        let mut diff_task = JoinSet::new();
        diff_task.spawn(diff::run(diff::Args {
            cx: cx.clone(),
            rx: looked_up_rx,
            tx: diffed_tx,
            store: store.clone(),
        }));

        let mut persist_task = JoinSet::new();
        persist_task.spawn(persist::run(persist::Args {
            cx: cx.clone(),
            rx: diffed_rx,
            tx: persisted_tx,
            store: store.clone(),
        }));

        let mut cursor_task = JoinSet::new();
        cursor_task.spawn(cursor_advance::run(cursor_advance::Args {
            cx: cx.clone(),
            rx: persisted_rx,
            store: store.clone(),
        }));

        let result = cursor_task.try_drain(cx.clone()).await;
        persist_task.try_drain(cx.clone()).await?;
        diff_task.try_drain(cx.clone()).await?;
        lookup_task.try_drain(cx.clone()).await?;
        format_task.try_drain(cx.clone()).await?;
        fetcher_task.try_drain(cx.clone()).await?;

        result
    }
}
