use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tokio::task::JoinHandle;
use wander_api::LoadingEvent;

/// Tracks in-flight requests from loading events.
///
/// The count saturates at zero, so a `Finished` without a matching `Started`
/// (e.g. after a lagged receiver dropped events) never leaves the indicator
/// stuck on.
#[derive(Debug, Default)]
pub struct LoadingOverlay {
    in_flight: usize,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event; returns whether visibility changed
    pub fn apply(&mut self, event: LoadingEvent) -> bool {
        let was_visible = self.is_visible();
        match event {
            LoadingEvent::Started => self.in_flight += 1,
            LoadingEvent::Finished => self.in_flight = self.in_flight.saturating_sub(1),
        }
        was_visible != self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight > 0
    }

    pub fn reset(&mut self) {
        self.in_flight = 0;
    }
}

/// Running terminal indicator; clears its line when dropped
pub struct TerminalOverlay {
    task: JoinHandle<()>,
    visible: Arc<AtomicBool>,
}

impl TerminalOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Wait for the overlay to stop after its signal is dropped
    pub async fn finished(mut self) {
        let _ = (&mut self.task).await;
    }
}

impl Drop for TerminalOverlay {
    fn drop(&mut self) {
        self.task.abort();
        if self.visible.swap(false, Ordering::SeqCst) {
            render(false);
        }
    }
}

/// Render a loading line on stderr while requests are in flight
pub fn spawn_terminal_overlay(mut rx: Receiver<LoadingEvent>) -> TerminalOverlay {
    let visible = Arc::new(AtomicBool::new(false));
    let shown = visible.clone();

    let task = tokio::spawn(async move {
        let mut overlay = LoadingOverlay::new();
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if overlay.apply(event) {
                        shown.store(overlay.is_visible(), Ordering::SeqCst);
                        render(overlay.is_visible());
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Loading overlay lagged, resetting");
                    overlay.reset();
                    if shown.swap(false, Ordering::SeqCst) {
                        render(false);
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    TerminalOverlay { task, visible }
}

fn render(visible: bool) {
    let mut stderr = std::io::stderr();
    if visible {
        let _ = write!(stderr, "\rLoading...");
    } else {
        let _ = write!(stderr, "\r          \r");
    }
    let _ = stderr.flush();
}
