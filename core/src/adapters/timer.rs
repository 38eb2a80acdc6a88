//! Grace period timer backed by the tokio clock.

use std::time::Duration;

use crate::ports::GraceTimer;

/// Sleeps on the tokio timer, so paused-clock tests advance it instantly.
pub struct TokioTimer;

impl GraceTimer for TokioTimer {
    async fn wait(&self, period: Duration) {
        tokio::time::sleep(period).await;
    }
}
