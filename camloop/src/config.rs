//! Configuration types and defaults

use camloop_media::{Resolution, StreamConstraints};

/// Capture configuration for a stream lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Rendering and snapshot width in pixels
    pub width: u32,
    /// Rendering and snapshot height in pixels
    pub height: u32,
}

impl CaptureConfig {
    /// Override the capture dimensions
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Acquisition constraints at the configured dimensions
    pub fn constraints(&self) -> StreamConstraints {
        StreamConstraints {
            video: true,
            resolution: Resolution::new(self.width, self.height),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}
