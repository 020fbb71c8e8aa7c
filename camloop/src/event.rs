//! Lifecycle events and keyboard input

use uuid::Uuid;

/// Events emitted by a stream lifecycle
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// A stream was acquired and bound
    StreamStarted {
        /// Id of the acquired stream
        stream_id: Uuid,
    },
    /// The active stream was released
    StreamStopped,
    /// The selected capability provider cannot acquire streams
    CapabilityMissing {
        /// Why the capability is unavailable
        reason: String,
    },
    /// An acquisition attempt failed
    AcquisitionFailed {
        /// Failure reason
        reason: String,
    },
    /// Surface configuration was applied
    SurfaceConfigured {
        /// Applied width in pixels
        width: u32,
        /// Applied height in pixels
        height: u32,
    },
}

impl LifecycleEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            LifecycleEvent::StreamStarted { .. } => "stream_started",
            LifecycleEvent::StreamStopped => "stream_stopped",
            LifecycleEvent::CapabilityMissing { .. } => "capability_missing",
            LifecycleEvent::AcquisitionFailed { .. } => "acquisition_failed",
            LifecycleEvent::SurfaceConfigured { .. } => "surface_configured",
        }
    }

    /// Check if this is an error event
    pub fn is_error_event(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::CapabilityMissing { .. } | LifecycleEvent::AcquisitionFailed { .. }
        )
    }
}

/// Keyboard event delivered to the lifecycle
#[derive(Debug, Clone)]
pub struct KeyEvent {
    /// Numeric key code
    pub code: u32,
    /// Key name as reported by the input layer
    pub key: String,
}

impl KeyEvent {
    /// Key code reported for Enter
    pub const ENTER_CODE: u32 = 13;

    /// Create a key event
    pub fn new(code: u32, key: &str) -> Self {
        Self {
            code,
            key: key.to_string(),
        }
    }

    /// The Enter key
    pub fn enter() -> Self {
        Self::new(Self::ENTER_CODE, "Enter")
    }

    /// Whether this event represents the Enter key, by code or name
    pub fn is_enter(&self) -> bool {
        self.code == Self::ENTER_CODE || self.key == "Enter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let started = LifecycleEvent::StreamStarted {
            stream_id: Uuid::new_v4(),
        };
        assert_eq!(started.event_type(), "stream_started");
        assert!(!started.is_error_event());

        let failed = LifecycleEvent::AcquisitionFailed {
            reason: "busy".to_string(),
        };
        assert_eq!(failed.event_type(), "acquisition_failed");
        assert!(failed.is_error_event());

        assert_eq!(LifecycleEvent::StreamStopped.event_type(), "stream_stopped");
    }

    #[test]
    fn test_enter_detection() {
        assert!(KeyEvent::enter().is_enter());
        // Either the code or the name alone is enough
        assert!(KeyEvent::new(13, "").is_enter());
        assert!(KeyEvent::new(0, "Enter").is_enter());

        assert!(!KeyEvent::new(27, "Escape").is_enter());
        assert!(!KeyEvent::new(0, "enter").is_enter());
    }
}
