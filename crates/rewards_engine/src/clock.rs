use std::time::Duration;

/// Source of the simulated watch time.
#[async_trait::async_trait]
pub trait WatchClock: Send + Sync {
    async fn wait(&self, delay: Duration);
}

/// Real wall-clock waiting on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait::async_trait]
impl WatchClock for TokioClock {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
