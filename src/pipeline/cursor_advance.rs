use async_channel::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::StashRiverResult;
use crate::model::{Cursor, Update};
use crate::store::DocStore;

pub struct Args {
    pub cx: CancellationToken,
    pub rx: Receiver<Update>,
    pub store: DocStore,
}

/// Writes the new cursor once Persist has reported success. Failure here is
/// logged but non-fatal: the in-memory cursor already advanced in the
/// Fetcher, and a stale stored cursor just means replaying a few pages on
/// restart — harmless against idempotent upserts (§4.6).
#[tracing::instrument(skip_all)]
pub async fn run(args: Args) -> StashRiverResult<()> {
    let Args { cx, rx, store } = args;

    loop {
        tokio::select! {
            _ = cx.cancelled() => {
                info!("cursor-advance stage cancelled");
                return Ok(());
            }
            update = rx.recv() => {
                let Ok(update) = update else {
                    info!("persist channel closed, cursor-advance stage exiting");
                    return Ok(());
                };

                let cursor = Cursor::new(update.cursor_id.clone());
                if let Err(e) = store.write_cursor(&cursor).await {
                    warn!(error = %e, cursor_id = %update.cursor_id, "failed to persist cursor");
                }
            }
        }
    }
}
