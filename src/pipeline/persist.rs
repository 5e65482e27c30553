use async_channel::{Receiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::StashRiverResult;
use crate::model::{FormattedStash, ItemRemoval, Update};
use crate::store::DocStore;

const WORKERS: usize = 8;

pub struct Args {
    pub cx: CancellationToken,
    pub rx: Receiver<Update>,
    pub tx: Sender<Update>,
    pub store: DocStore,
}

async fn persist_partition(
    store: DocStore,
    worker_index: usize,
    stashes: Vec<FormattedStash>,
    deletes: Vec<ItemRemoval>,
) -> bool {
    match store.bulk(&stashes, &deletes).await {
        Ok(()) => true,
        Err((e, raw_body)) => {
            error!(error = %e, worker_index, "bulk persist failed, writing raw body to disk");
            let path = format!("failed-bulk-{worker_index}.ndjson");
            if let Err(write_err) = std::fs::write(&path, &raw_body) {
                error!(error = %write_err, path, "failed to write post-mortem bulk body");
            }
            false
        }
    }
}

/// Writes every create/update and removal for a page in one compressed
/// ND-JSON bulk request per partition, fanning out across 8 workers that
/// split both `filtered_stashes` and `deletes` by slice index, then
/// barriers on all of them before reporting success. Any worker's failure
/// fails the whole page — the cursor must not advance (§4.5).
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) -> StashRiverResult<()> {
    let Args { cx, rx, tx, store } = args;

    loop {
        tokio::select! {
            _ = cx.cancelled() => {
                info!("persist stage cancelled");
                return Ok(());
            }
            update = rx.recv() => {
                let Ok(update) = update else {
                    info!("diff channel closed, persist stage exiting");
                    return Ok(());
                };

                let stash_partitions = partition(update.filtered_stashes.clone(), WORKERS);
                let delete_partitions = partition(update.deletes.clone(), WORKERS);

                let mut workers = JoinSet::new();
                for i in 0..WORKERS {
                    let stashes = stash_partitions.get(i).cloned().unwrap_or_default();
                    let deletes = delete_partitions.get(i).cloned().unwrap_or_default();
                    if stashes.is_empty() && deletes.is_empty() {
                        continue;
                    }
                    let store = store.clone();
                    workers.spawn(persist_partition(store, i, stashes, deletes));
                }

                let mut all_succeeded = true;
                while let Some(joined) = workers.join_next().await {
                    match joined {
                        Ok(true) => {}
                        Ok(false) => all_succeeded = false,
                        Err(e) => {
                            error!(error = %e, "persist worker panicked");
                            all_succeeded = false;
                        }
                    }
                }

                if !all_succeeded {
                    info!(cursor_id = %update.cursor_id, "page persist failed, cursor will not advance");
                    continue;
                }

                if tx.send(update).await.is_err() {
                    info!("downstream channel closed, persist stage exiting");
                    return Ok(());
                }
            }
        }
    }
}

fn partition<T: Clone>(items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    let mut buckets: Vec<Vec<T>> = (0..workers).map(|_| Vec::new()).collect();
    for (i, item) in items.into_iter().enumerate() {
        buckets[i % workers].push(item);
    }
    buckets
}
