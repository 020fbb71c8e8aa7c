//! Capability providers for camera stream acquisition
//!
//! Acquisition goes through a single [`CapabilityProvider`] selected once at
//! startup, polymorphic over the standard and legacy API generations. Callers
//! never probe individual platform APIs themselves.

use crate::error::{CaptureError, CaptureResult};
use crate::frame::{Resolution, VideoFrame};
use crate::stream::{CameraStream, StreamOrigin, StreamTrack};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Constraints for a stream acquisition request
#[derive(Debug, Clone)]
pub struct StreamConstraints {
    /// Request a video track
    pub video: bool,
    /// Preferred capture resolution
    pub resolution: Resolution,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            video: true,
            resolution: Resolution::VGA,
        }
    }
}

/// Camera-acquisition service
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Provider name for diagnostics
    fn name(&self) -> &'static str;

    /// Whether the provider can acquire streams on this runtime
    fn is_available(&self) -> bool;

    /// Request a new camera stream
    async fn request_stream(&self, constraints: &StreamConstraints) -> CaptureResult<CameraStream>;
}

impl fmt::Debug for dyn CapabilityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityProvider")
            .field("name", &self.name())
            .finish()
    }
}

/// Select a capability provider once at startup
///
/// Prefers the standard API generation and falls back to legacy.
pub fn detect_provider() -> CaptureResult<Arc<dyn CapabilityProvider>> {
    select_provider(vec![
        Arc::new(StandardCapability::new()),
        Arc::new(LegacyCapability::new()),
    ])
}

/// Pick the first available provider from an ordered candidate list
pub fn select_provider(
    candidates: Vec<Arc<dyn CapabilityProvider>>,
) -> CaptureResult<Arc<dyn CapabilityProvider>> {
    for provider in candidates {
        if provider.is_available() {
            info!(provider = provider.name(), "selected capability provider");
            return Ok(provider);
        }
    }
    Err(CaptureError::CapabilityUnavailable {
        reason: "no camera acquisition API present".to_string(),
    })
}

fn placeholder_stream(origin: StreamOrigin, constraints: &StreamConstraints) -> CameraStream {
    let stream = CameraStream::new(origin, &["camera"]);
    stream.publish_frame(VideoFrame::filled(
        constraints.resolution.width,
        constraints.resolution.height,
        [16, 16, 16, 255],
        0,
    ));
    stream
}

/// Provider for the current-generation acquisition API
#[derive(Debug, Default)]
pub struct StandardCapability;

impl StandardCapability {
    /// Create a standard provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CapabilityProvider for StandardCapability {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn is_available(&self) -> bool {
        // TODO: probe the platform camera service once device capture lands
        true
    }

    async fn request_stream(&self, constraints: &StreamConstraints) -> CaptureResult<CameraStream> {
        if !constraints.video {
            return Err(CaptureError::InvalidConfiguration {
                message: "acquisition requested without any media kind".to_string(),
            });
        }
        // TODO: route through the platform camera service; a placeholder
        // stream stands in until device capture lands
        let stream = placeholder_stream(StreamOrigin::Standard, constraints);
        info!(stream_id = %stream.id(), "standard acquisition produced stream");
        Ok(stream)
    }
}

/// Provider for the prefixed-era acquisition API
///
/// Streams acquired here may be refused direct surface binding and fall back
/// to object-URL binding.
#[derive(Debug, Default)]
pub struct LegacyCapability;

impl LegacyCapability {
    /// Create a legacy provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CapabilityProvider for LegacyCapability {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn request_stream(&self, constraints: &StreamConstraints) -> CaptureResult<CameraStream> {
        if !constraints.video {
            return Err(CaptureError::InvalidConfiguration {
                message: "acquisition requested without any media kind".to_string(),
            });
        }
        let stream = placeholder_stream(StreamOrigin::Legacy, constraints);
        info!(stream_id = %stream.id(), "legacy acquisition produced stream");
        Ok(stream)
    }
}

/// Mock capability provider for testing and unsupported platforms
///
/// Tracks every acquisition it serves so tests can assert on acquisition
/// counts and on how many handed-out streams still carry live tracks.
#[derive(Debug)]
pub struct MockCapability {
    available: bool,
    fail_acquisition: bool,
    origin: StreamOrigin,
    delay: Option<Duration>,
    acquisitions: AtomicU64,
    handed_out: Mutex<Vec<Vec<StreamTrack>>>,
}

impl MockCapability {
    /// Provider that acquires successfully
    pub fn available() -> Self {
        Self {
            available: true,
            fail_acquisition: false,
            origin: StreamOrigin::Standard,
            delay: None,
            acquisitions: AtomicU64::new(0),
            handed_out: Mutex::new(Vec::new()),
        }
    }

    /// Provider reporting no capability at all
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::available()
        }
    }

    /// Provider that is present but fails every acquisition
    pub fn failing() -> Self {
        Self {
            fail_acquisition: true,
            ..Self::available()
        }
    }

    /// Tag produced streams with the given origin
    pub fn with_origin(mut self, origin: StreamOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Delay every acquisition, keeping it in flight for the given duration
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of acquisition requests served
    pub fn acquisition_count(&self) -> u64 {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Number of handed-out streams that still have a live track
    pub fn live_stream_count(&self) -> usize {
        self.handed_out
            .lock()
            .iter()
            .filter(|tracks| tracks.iter().any(StreamTrack::is_live))
            .count()
    }
}

#[async_trait]
impl CapabilityProvider for MockCapability {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_stream(&self, constraints: &StreamConstraints) -> CaptureResult<CameraStream> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if !self.available {
            return Err(CaptureError::CapabilityUnavailable {
                reason: "mock capability disabled".to_string(),
            });
        }
        if self.fail_acquisition {
            return Err(CaptureError::AcquisitionFailed {
                reason: "mock acquisition failure".to_string(),
            });
        }
        if !constraints.video {
            return Err(CaptureError::InvalidConfiguration {
                message: "acquisition requested without any media kind".to_string(),
            });
        }
        let stream = placeholder_stream(self.origin, constraints);
        self.handed_out.lock().push(stream.tracks().to_vec());
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_provider_prefers_first_available() {
        let selected = select_provider(vec![
            Arc::new(MockCapability::unavailable()),
            Arc::new(LegacyCapability::new()),
        ])
        .unwrap();
        assert_eq!(selected.name(), "legacy");
    }

    #[tokio::test]
    async fn test_select_provider_with_no_candidates() {
        let err = select_provider(vec![Arc::new(MockCapability::unavailable())]).unwrap_err();
        assert!(matches!(err, CaptureError::CapabilityUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_mock_tracks_live_streams() {
        let provider = MockCapability::available();
        let constraints = StreamConstraints::default();

        let first = provider.request_stream(&constraints).await.unwrap();
        let second = provider.request_stream(&constraints).await.unwrap();
        assert_eq!(provider.acquisition_count(), 2);
        assert_eq!(provider.live_stream_count(), 2);

        first.stop_all();
        assert_eq!(provider.live_stream_count(), 1);
        second.stop_all();
        assert_eq!(provider.live_stream_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_failure_modes() {
        let failing = MockCapability::failing();
        let err = failing
            .request_stream(&StreamConstraints::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::AcquisitionFailed { .. }));
        assert_eq!(failing.acquisition_count(), 1);

        let unavailable = MockCapability::unavailable();
        assert!(!unavailable.is_available());
    }

    #[tokio::test]
    async fn test_acquired_stream_carries_frame_at_requested_resolution() {
        let provider = StandardCapability::new();
        let constraints = StreamConstraints {
            video: true,
            resolution: Resolution::QVGA,
        };
        let stream = provider.request_stream(&constraints).await.unwrap();
        let frame = stream.frame_source().latest().unwrap();
        assert_eq!(frame.resolution(), Resolution::QVGA);
    }
}
