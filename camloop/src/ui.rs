//! UI collaborator seams
//!
//! The lifecycle never looks up concrete controls; it talks to injected
//! observer traits so any UI layout can wire itself in.

use tracing::error;

/// Visibility of the start/stop controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsState {
    /// Whether the start control is shown
    pub start_visible: bool,
    /// Whether the stop control is shown
    pub stop_visible: bool,
}

impl ControlsState {
    /// Control layout while a stream is live
    pub fn streaming() -> Self {
        Self {
            start_visible: false,
            stop_visible: true,
        }
    }

    /// Control layout while stopped
    pub fn idle() -> Self {
        Self {
            start_visible: true,
            stop_visible: false,
        }
    }
}

/// Observes start/stop control enablement changes
pub trait EnablementObserver: Send + Sync {
    /// Called whenever control visibility should change
    fn controls_changed(&self, state: ControlsState);
}

/// Movement indicator surface, toggled in lockstep with stream state
pub trait IndicatorSurface: Send + Sync {
    /// Show the indicator
    fn show(&self);

    /// Hide the indicator
    fn hide(&self);
}

/// User-facing reporting channel for capability errors
pub trait AlertSink: Send + Sync {
    /// Surface a message to the user
    fn alert(&self, message: &str);
}

/// Alert sink that reports through the error log
#[derive(Debug, Default)]
pub struct LoggingAlert;

impl AlertSink for LoggingAlert {
    fn alert(&self, message: &str) {
        error!("{message}");
    }
}
