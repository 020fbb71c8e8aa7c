//! Page-visibility signal plumbing
//!
//! A hidden page releases the camera so it never stays live in the
//! background; becoming visible again re-runs the configure/start path.

use crate::lifecycle::StreamLifecycle;
use tokio::sync::watch;
use tracing::debug;

/// Observable page-visibility signal
pub trait VisibilitySignal: Send + Sync {
    /// Whether the page is currently visible
    fn is_visible(&self) -> bool;

    /// Subscribe to visibility transitions
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// In-process visibility signal backed by a watch channel
#[derive(Debug)]
pub struct SharedVisibility {
    tx: watch::Sender<bool>,
}

impl SharedVisibility {
    /// Create a signal in the given initial state
    pub fn new(visible: bool) -> Self {
        let (tx, _rx) = watch::channel(visible);
        Self { tx }
    }

    /// Record a visibility transition
    pub fn set_visible(&self, visible: bool) {
        self.tx.send_replace(visible);
    }
}

impl Default for SharedVisibility {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VisibilitySignal for SharedVisibility {
    fn is_visible(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Drive a lifecycle from a visibility signal
///
/// The returned task runs until the signal's sender is dropped.
pub fn spawn_visibility_watcher(
    lifecycle: StreamLifecycle,
    signal: &dyn VisibilitySignal,
) -> tokio::task::JoinHandle<()> {
    let mut rx = signal.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let visible = *rx.borrow_and_update();
            debug!(visible, "visibility transition");
            lifecycle.handle_visibility(visible).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_reports_current_state() {
        let signal = SharedVisibility::new(true);
        assert!(signal.is_visible());

        signal.set_visible(false);
        assert!(!signal.is_visible());
    }

    #[tokio::test]
    async fn test_subscription_sees_transitions() {
        let signal = SharedVisibility::new(true);
        let mut rx = signal.subscribe();

        signal.set_visible(false);
        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());

        signal.set_visible(true);
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
    }
}
