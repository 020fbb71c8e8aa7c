//! Display surface abstraction and software implementation
//!
//! A surface is externally owned by the UI layer and handed to the lifecycle
//! as a shared handle; the lifecycle only mutates its source binding,
//! dimensions, and background color.

use crate::error::{CaptureError, CaptureResult};
use crate::frame::VideoFrame;
use crate::stream::{CameraStream, FrameSource};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Background color applied to a surface with no source (opaque black)
pub const INERT_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Source binding currently applied to a surface
#[derive(Debug, Clone)]
pub enum SurfaceSource {
    /// Directly bound stream
    Stream {
        /// Bound stream id
        id: Uuid,
        /// Shared latest-frame cell of the bound stream
        frames: FrameSource,
    },
    /// Object-URL binding, the fallback strategy
    Url(String),
}

/// A visual sink that renders a bound media source
pub trait DisplaySurface: Send + Sync {
    /// Apply rendering dimensions
    fn set_dimensions(&mut self, width: u32, height: u32);

    /// Current rendering dimensions
    fn dimensions(&self) -> (u32, u32);

    /// Bind a stream as the surface source
    ///
    /// Surfaces that cannot accept a stream directly reject with
    /// [`CaptureError::BindingRejected`]; callers then fall back to
    /// [`DisplaySurface::bind_url`].
    fn bind_stream(&mut self, stream: &CameraStream) -> CaptureResult<()>;

    /// Bind by object URL, the alternate binding strategy
    fn bind_url(&mut self, url: &str);

    /// Drop the current source binding
    fn clear_source(&mut self);

    /// Whether a source is currently bound
    fn has_source(&self) -> bool;

    /// Set the background color
    fn set_background(&mut self, color: [f32; 4]);

    /// Current background color
    fn background(&self) -> [f32; 4];

    /// Current frame of the bound source, if any
    fn current_frame(&self) -> Option<VideoFrame>;
}

/// Shared surface handle passed between the UI layer and the lifecycle
pub type SharedSurface = Arc<Mutex<dyn DisplaySurface>>;

/// Wrap a concrete surface in the shared handle used by the lifecycle
pub fn shared_surface(surface: impl DisplaySurface + 'static) -> SharedSurface {
    Arc::new(Mutex::new(surface))
}

/// Software display surface
#[derive(Debug)]
pub struct VideoSurface {
    width: u32,
    height: u32,
    background: [f32; 4],
    source: Option<SurfaceSource>,
    accepts_stream_binding: bool,
}

impl VideoSurface {
    /// Create a surface that accepts direct stream binding
    pub fn new() -> Self {
        Self {
            width: 640,
            height: 480,
            background: INERT_BACKGROUND,
            source: None,
            accepts_stream_binding: true,
        }
    }

    /// Create a surface that refuses direct stream binding
    ///
    /// Models legacy-era sinks that only render from an object URL.
    pub fn without_stream_binding() -> Self {
        Self {
            accepts_stream_binding: false,
            ..Self::new()
        }
    }

    /// Current source binding
    pub fn source(&self) -> Option<&SurfaceSource> {
        self.source.as_ref()
    }
}

impl Default for VideoSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for VideoSurface {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn bind_stream(&mut self, stream: &CameraStream) -> CaptureResult<()> {
        if !self.accepts_stream_binding {
            return Err(CaptureError::BindingRejected {
                reason: "surface does not accept direct stream sources".to_string(),
            });
        }
        self.source = Some(SurfaceSource::Stream {
            id: stream.id(),
            frames: stream.frame_source(),
        });
        debug!(stream_id = %stream.id(), "stream bound to surface");
        Ok(())
    }

    fn bind_url(&mut self, url: &str) {
        self.source = Some(SurfaceSource::Url(url.to_string()));
        debug!(url, "surface bound by object URL");
    }

    fn clear_source(&mut self) {
        self.source = None;
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn set_background(&mut self, color: [f32; 4]) {
        self.background = color;
    }

    fn background(&self) -> [f32; 4] {
        self.background
    }

    fn current_frame(&self) -> Option<VideoFrame> {
        match &self.source {
            Some(SurfaceSource::Stream { frames, .. }) => frames.latest(),
            // URL sources render out-of-band; no frame to read back
            Some(SurfaceSource::Url(_)) => None,
            None => None,
        }
    }
}
