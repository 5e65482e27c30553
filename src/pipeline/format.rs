use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::currency::CurrencyTracker;
use crate::error::StashRiverResult;
use crate::model::{FormattedStash, Page, Update};
use crate::normalizer::{self, NormalizeContext};

const DROPPED_LEAGUES: &[&str] = &["Standard", "Hardcore"];

fn league_survives(league: &str) -> bool {
    !DROPPED_LEAGUES.contains(&league) && !league.contains(' ')
}

pub struct Args {
    pub cx: CancellationToken,
    pub rx: Receiver<Page>,
    pub tx: Sender<Update>,
    pub currency: Arc<CurrencyTracker>,
}

/// Drops off-league/hardcore stashes, normalizes every surviving item, and
/// records the full ordered item-id membership each stash needs for the
/// Diff stage (§4.2). Never produced at more than one update's lead over
/// what downstream can consume, by construction of the bounded channel.
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) -> StashRiverResult<()> {
    let Args {
        cx,
        rx,
        tx,
        currency,
    } = args;

    loop {
        tokio::select! {
            _ = cx.cancelled() => {
                info!("format stage cancelled");
                return Ok(());
            }
            page = rx.recv() => {
                let Ok(page) = page else {
                    info!("upstream channel closed, format stage exiting");
                    return Ok(());
                };

                let mut update = Update::new(page.next_id);

                for stash in &page.stashes {
                    if !league_survives(&stash.league) {
                        continue;
                    }

                    let item_ids: Vec<String> = stash.items.iter().map(|i| i.id.clone()).collect();
                    let items = stash
                        .items
                        .iter()
                        .map(|raw| {
                            let ctx = NormalizeContext {
                                account: stash.account_name.clone(),
                                stash_id: stash.id.clone(),
                                currency: &currency,
                                created_at: None,
                            };
                            normalizer::normalize(raw, &ctx)
                        })
                        .collect();

                    update.filtered_stashes.push(FormattedStash {
                        stash_id: stash.id.clone(),
                        account_name: stash.account_name.clone(),
                        league: stash.league.clone(),
                        item_ids,
                        items,
                    });
                }

                if tx.send(update).await.is_err() {
                    info!("downstream channel closed, format stage exiting");
                    return Ok(());
                }
            }
        }
    }
}
