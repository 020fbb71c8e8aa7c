//! # Camloop Media
//!
//! Camera stream acquisition, display surfaces, and snapshot capture for
//! camloop. This crate handles the media-facing half of the system: the
//! capability providers streams are acquired through, the stream and track
//! handles themselves, the surface abstraction streams are bound to, and
//! still-image capture from a surface's current frame.

#![warn(clippy::all)]

pub mod capability;
pub mod error;
pub mod frame;
pub mod snapshot;
pub mod stream;
pub mod surface;

// Re-export main types
pub use capability::{
    detect_provider, select_provider, CapabilityProvider, LegacyCapability, MockCapability,
    StandardCapability, StreamConstraints,
};
pub use error::{CaptureError, CaptureResult, ErrorCategory};
pub use frame::{Resolution, VideoFrame};
pub use snapshot::{capture_still, RasterImage, SnapshotSink};
pub use stream::{CameraStream, FrameSource, StreamOrigin, StreamTrack, TrackState};
pub use surface::{
    shared_surface, DisplaySurface, SharedSurface, SurfaceSource, VideoSurface, INERT_BACKGROUND,
};
