//! Camera stream and track handles
//!
//! A [`CameraStream`] is the opaque handle returned by a successful acquisition
//! request. It holds one or more tracks, a shared latest-frame cell that bound
//! surfaces read from, and the API generation it was acquired through. The
//! stream is destroyed by explicitly stopping all of its tracks.

use crate::frame::VideoFrame;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// API generation a stream was acquired through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOrigin {
    /// Current-generation acquisition API
    Standard,
    /// Prefixed-era acquisition API; surfaces may require URL binding
    Legacy,
}

/// Live/ended state of a single track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Track is delivering media
    Live,
    /// Track was explicitly stopped
    Ended,
}

/// A single media track within a stream
///
/// Track state is shared between clones, so a handle held by the acquirer
/// observes a `stop()` issued through any other handle.
#[derive(Debug, Clone)]
pub struct StreamTrack {
    id: Uuid,
    label: String,
    state: Arc<RwLock<TrackState>>,
}

impl StreamTrack {
    /// Create a new live track
    pub fn new(label: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.to_string(),
            state: Arc::new(RwLock::new(TrackState::Live)),
        }
    }

    /// Track identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable track label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current track state
    pub fn state(&self) -> TrackState {
        *self.state.read()
    }

    /// Whether the track is still delivering media
    pub fn is_live(&self) -> bool {
        self.state() == TrackState::Live
    }

    /// Stop the track
    pub fn stop(&self) {
        *self.state.write() = TrackState::Ended;
    }
}

/// Latest-frame cell shared between a stream and the surfaces bound to it
#[derive(Debug, Clone, Default)]
pub struct FrameSource {
    inner: Arc<RwLock<Option<VideoFrame>>>,
}

impl FrameSource {
    /// Create an empty frame source
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new frame, replacing the previous one
    pub fn publish(&self, frame: VideoFrame) {
        *self.inner.write() = Some(frame);
    }

    /// Most recently published frame, if any
    pub fn latest(&self) -> Option<VideoFrame> {
        self.inner.read().clone()
    }

    /// Drop the published frame
    pub fn clear(&self) {
        *self.inner.write() = None;
    }
}

/// Live handle to one or more camera media tracks
///
/// Owned exclusively by the component that acquired it; surfaces only hold the
/// cloned [`FrameSource`], never the stream itself.
#[derive(Debug)]
pub struct CameraStream {
    id: Uuid,
    origin: StreamOrigin,
    tracks: Vec<StreamTrack>,
    source: FrameSource,
}

impl CameraStream {
    /// Create a stream with one live track per label
    pub fn new(origin: StreamOrigin, track_labels: &[&str]) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            tracks: track_labels.iter().map(|l| StreamTrack::new(l)).collect(),
            source: FrameSource::new(),
        }
    }

    /// Stream identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// API generation the stream was acquired through
    pub fn origin(&self) -> StreamOrigin {
        self.origin
    }

    /// Tracks carried by the stream
    pub fn tracks(&self) -> &[StreamTrack] {
        &self.tracks
    }

    /// Whether any track is still live
    pub fn is_active(&self) -> bool {
        self.tracks.iter().any(StreamTrack::is_live)
    }

    /// Stop every track and drop the published frame
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
        self.source.clear();
        debug!(stream_id = %self.id, "all tracks stopped");
    }

    /// Shared latest-frame cell for surface binding
    pub fn frame_source(&self) -> FrameSource {
        self.source.clone()
    }

    /// Publish a frame to bound surfaces
    pub fn publish_frame(&self, frame: VideoFrame) {
        self.source.publish(frame);
    }

    /// Object URL for the legacy surface binding strategy
    pub fn object_url(&self) -> String {
        format!("stream://{}", self.id)
    }
}
