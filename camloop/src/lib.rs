//! # Camloop
//!
//! Camera stream lifecycle management with a deterministic start/stop state.
//! A [`StreamLifecycle`] acquires a camera stream through a capability
//! provider, binds it to a display surface, and tears it down cleanly in
//! response to explicit requests, key events, and page-visibility changes,
//! so UI callers cannot double-acquire or leak a live camera. Still images
//! are captured independently from the surface's current frame.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use camloop::{shared_surface, LifecycleState, StreamLifecycle, VideoSurface};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Pick the acquisition API once at startup
//!     let provider = camloop::detect_provider()?;
//!     let lifecycle = StreamLifecycle::builder(provider).build();
//!
//!     // Hand over the UI's surface and start streaming
//!     let surface = shared_surface(VideoSurface::new());
//!     lifecycle.configure(Some(surface), 640, 480);
//!     lifecycle.start().await;
//!     assert_eq!(lifecycle.state(), LifecycleState::Active);
//!
//!     // Grab a still, then release the camera
//!     let still = lifecycle.capture_still(None);
//!     lifecycle.stop().await;
//!     assert!(still.is_some());
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export media types for easy access
pub use camloop_media::{
    capture_still, detect_provider, select_provider, CameraStream, CapabilityProvider,
    CaptureError, CaptureResult, DisplaySurface, ErrorCategory, FrameSource, LegacyCapability,
    MockCapability, RasterImage, Resolution, SnapshotSink, StandardCapability, StreamConstraints,
    StreamOrigin, StreamTrack, SurfaceSource, TrackState, VideoFrame, VideoSurface,
};
pub use camloop_media::{shared_surface, SharedSurface, INERT_BACKGROUND};

// Public API modules
pub mod config;
pub mod event;
pub mod lifecycle;
pub mod notify;
pub mod ui;
pub mod visibility;

// Re-export main API types
pub use config::CaptureConfig;
pub use event::{KeyEvent, LifecycleEvent};
pub use lifecycle::{LifecycleBuilder, LifecycleState, StreamLifecycle};
pub use notify::{
    notify_user, Notification, NotificationPermission, NotificationProvider, NotifyError,
};
pub use ui::{AlertSink, ControlsState, EnablementObserver, IndicatorSurface, LoggingAlert};
pub use visibility::{spawn_visibility_watcher, SharedVisibility, VisibilitySignal};
