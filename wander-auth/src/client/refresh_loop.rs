use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::token_manager::TokenManager;

/// Stops the background refresh task when dropped
pub struct RefreshLoopHandle {
    task: JoinHandle<()>,
}

impl RefreshLoopHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshLoopHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Check the access token every `period`, whether or not requests are being made
pub fn spawn_refresh_loop(manager: Arc<TokenManager>, period: Duration) -> RefreshLoopHandle {
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(e) = manager.check_and_refresh().await {
                tracing::warn!(error = %e, "Background token check failed");
            }
        }
    });

    tracing::debug!(period_secs = period.as_secs(), "Token refresh loop started");
    RefreshLoopHandle { task }
}
