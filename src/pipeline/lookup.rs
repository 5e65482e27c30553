use async_channel::{Receiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::StashRiverResult;
use crate::model::{FormattedStash, IndexedItem, Update};
use crate::store::DocStore;

const WORKERS: usize = 8;

pub struct Args {
    pub cx: CancellationToken,
    pub rx: Receiver<Update>,
    pub tx: Sender<Update>,
    pub store: DocStore,
}

/// Ignoring these before compare means metadata that's expected to differ
/// by construction never triggers a spurious "changed" verdict (§4.3).
fn content_equal(candidate: &IndexedItem, stored: &IndexedItem) -> bool {
    let mut masked = stored.clone();
    masked.account = candidate.account.clone();
    masked.last_updated = candidate.last_updated;
    masked.created_at = candidate.created_at;
    *candidate == masked
}

/// Looks up existing documents for one stash's items and keeps only
/// genuine creates/updates, resolving `created_at` from the stored copy
/// when one exists.
async fn lookup_stash(store: &DocStore, mut stash: FormattedStash) -> StashRiverResult<FormattedStash> {
    let ids: Vec<String> = stash.items.iter().map(|i| i.id.clone()).collect();
    let stored = store.mget_items(&stash.league, &ids).await?;

    stash.items.retain_mut(|item| match stored.get(&item.id) {
        None => true,
        Some(existing) => {
            item.created_at = existing.created_at;
            !content_equal(item, existing)
        }
    });

    Ok(stash)
}

async fn lookup_partition(store: DocStore, stashes: Vec<FormattedStash>) -> StashRiverResult<Vec<FormattedStash>> {
    let mut out = Vec::with_capacity(stashes.len());
    for stash in stashes {
        out.push(lookup_stash(&store, stash).await?);
    }
    Ok(out)
}

/// Suppresses no-op re-sightings: for each stash's items, fetches the
/// currently stored documents in one bulk multi-get per partition, fanning
/// out across 8 workers that split the stash list by slice index (§4.3).
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) -> StashRiverResult<()> {
    let Args { cx, rx, tx, store } = args;

    loop {
        tokio::select! {
            _ = cx.cancelled() => {
                info!("lookup stage cancelled");
                return Ok(());
            }
            update = rx.recv() => {
                let Ok(mut update) = update else {
                    info!("format channel closed, lookup stage exiting");
                    return Ok(());
                };

                let stashes = std::mem::take(&mut update.filtered_stashes);
                let partitions = partition(stashes, WORKERS);

                let mut workers = JoinSet::new();
                for partition in partitions {
                    let store = store.clone();
                    workers.spawn(lookup_partition(store, partition));
                }

                let mut results: Vec<Vec<FormattedStash>> = Vec::new();
                let mut store_failed = false;
                while let Some(joined) = workers.join_next().await {
                    match joined {
                        Ok(Ok(stashes)) => results.push(stashes),
                        Ok(Err(e)) => {
                            error!(error = %e, "lookup partition failed against document store, skipping page");
                            store_failed = true;
                        }
                        Err(e) => {
                            cx.cancel();
                            return Err(crate::error::PipelineError::WorkerPanic(e.to_string()).into());
                        }
                    }
                }

                if store_failed {
                    info!(cursor_id = %update.cursor_id, "lookup failed for this page, skipping without advancing cursor");
                    continue;
                }

                update.filtered_stashes = results.into_iter().flatten().collect();

                if tx.send(update).await.is_err() {
                    info!("downstream channel closed, lookup stage exiting");
                    return Ok(());
                }
            }
        }
    }
}

fn partition<T>(items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    let mut buckets: Vec<Vec<T>> = (0..workers).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        buckets[i % workers].push(item);
    }
    buckets.into_iter().filter(|b| !b.is_empty()).collect()
}
