use async_channel::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::StashRiverResult;
use crate::model::{ItemRemoval, Update};
use crate::store::DocStore;

pub struct Args {
    pub cx: CancellationToken,
    pub rx: Receiver<Update>,
    pub tx: Sender<Update>,
    pub store: DocStore,
}

/// Derives implicit removals by diffing each stash's full current item-id
/// membership against its prior `StashMapping`, fetched in a single bulk
/// multi-get keyed by stash id. A stash absent from the old snapshot
/// contributes no removals — first sighting, not a mass deletion (§4.4).
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) -> StashRiverResult<()> {
    let Args { cx, rx, tx, store } = args;

    loop {
        tokio::select! {
            _ = cx.cancelled() => {
                info!("diff stage cancelled");
                return Ok(());
            }
            update = rx.recv() => {
                let Ok(mut update) = update else {
                    info!("lookup channel closed, diff stage exiting");
                    return Ok(());
                };

                let stash_ids: Vec<String> = update
                    .filtered_stashes
                    .iter()
                    .map(|s| s.stash_id.clone())
                    .collect();
                let prior_mappings = match store.mget_mappings(&stash_ids).await {
                    Ok(mappings) => mappings,
                    Err(e) => {
                        error!(error = %e, cursor_id = %update.cursor_id, "failed to fetch prior stash mappings, skipping page");
                        continue;
                    }
                };

                let mut deletes = Vec::new();
                for stash in &update.filtered_stashes {
                    if let Some(prior) = prior_mappings.get(&stash.stash_id) {
                        for removed_id in prior.removed_since(&stash.item_ids) {
                            deletes.push(ItemRemoval {
                                stash_id: stash.stash_id.clone(),
                                item_id: removed_id,
                                league: stash.league.clone(),
                            });
                        }
                    }
                }
                update.deletes = deletes;

                if tx.send(update).await.is_err() {
                    info!("downstream channel closed, diff stage exiting");
                    return Ok(());
                }
            }
        }
    }
}
