use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::error::{PipelineError, StashRiverResult};

trait Drainer {
    async fn drain(&mut self);
}

impl<T: 'static> Drainer for JoinSet<T> {
    async fn drain(&mut self) {
        while self.join_next().await.is_some() {}
    }
}

trait DrainSafely {
    async fn drain_safely(&mut self, secs: u64);
}

impl<T: 'static> DrainSafely for JoinSet<T> {
    async fn drain_safely(&mut self, secs: u64) {
        tokio::select! {
            _ = self.drain() => {
                debug!("all stage workers drained successfully");
            }
            _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                warn!("stage workers stuck during shutdown (timeout), dropping handle");
            }
        }
    }
}

/// Joins every worker in a stage's `JoinSet`, cancelling the whole pipeline
/// and draining the rest on the first application error or panic.
pub trait TryDrain {
    async fn try_drain(self, cancel: CancellationToken) -> StashRiverResult<()>;
}

impl TryDrain for JoinSet<StashRiverResult<()>> {
    async fn try_drain(mut self, cancel: CancellationToken) -> StashRiverResult<()> {
        while let Some(result) = self.join_next().await {
            match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => {
                    error!(error = %e, "stage worker failed, triggering graceful cancellation");
                    cancel.cancel();
                    self.drain_safely(5).await;
                    return Err(e);
                }
                Err(e) => {
                    error!(error = %e, "stage worker panicked, cancelling");
                    cancel.cancel();
                    self.drain_safely(5).await;
                    return Err(PipelineError::WorkerPanic(e.to_string()).into());
                }
            }
        }
        Ok(())
    }
}
