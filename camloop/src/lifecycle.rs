//! Stream lifecycle management
//!
//! [`StreamLifecycle`] owns acquisition and release of a single camera stream
//! and its binding to a display surface. It reacts to explicit start/stop
//! requests, key events, and page-visibility changes, and keeps a
//! deterministic state so callers cannot double-acquire or leak a stream.
//!
//! Acquisition requests are serialized per lifecycle: a `start()` while a
//! request is already in flight (or a stream is active) is a no-op, and every
//! `stop()` bumps a generation counter so an acquisition that completes after
//! a later `stop()` is released immediately instead of being rebound.

use crate::config::CaptureConfig;
use crate::event::{KeyEvent, LifecycleEvent};
use crate::ui::{AlertSink, ControlsState, EnablementObserver, IndicatorSurface, LoggingAlert};
use camloop_media::{
    capture_still, CameraStream, CapabilityProvider, RasterImage, SharedSurface, SnapshotSink,
    INERT_BACKGROUND,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stopped/Starting/Active status of the camera binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No stream is held or requested
    Stopped,
    /// An acquisition request is in flight
    Starting,
    /// A stream is held and bound
    Active,
}

/// Message shown when no capability provider can acquire streams
const NO_SUPPORT_MESSAGE: &str = "No camera support found";

struct LifecycleCore {
    config: CaptureConfig,
    surface: Option<SharedSurface>,
    stream: Option<CameraStream>,
    state: LifecycleState,
    generation: u64,
}

struct LifecycleInner {
    provider: Arc<dyn CapabilityProvider>,
    controls: Option<Arc<dyn EnablementObserver>>,
    indicator: Option<Arc<dyn IndicatorSurface>>,
    alert: Arc<dyn AlertSink>,
    event_tx: broadcast::Sender<LifecycleEvent>,
    core: Mutex<LifecycleCore>,
}

/// Builder for [`StreamLifecycle`]
pub struct LifecycleBuilder {
    provider: Arc<dyn CapabilityProvider>,
    config: CaptureConfig,
    controls: Option<Arc<dyn EnablementObserver>>,
    indicator: Option<Arc<dyn IndicatorSurface>>,
    alert: Option<Arc<dyn AlertSink>>,
}

impl LifecycleBuilder {
    fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self {
            provider,
            config: CaptureConfig::default(),
            controls: None,
            indicator: None,
            alert: None,
        }
    }

    /// Set the capture configuration
    pub fn config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach the start/stop control observer
    pub fn controls(mut self, observer: Arc<dyn EnablementObserver>) -> Self {
        self.controls = Some(observer);
        self
    }

    /// Attach the movement indicator surface
    pub fn indicator(mut self, indicator: Arc<dyn IndicatorSurface>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Set the user alert sink (defaults to the error log)
    pub fn alert(mut self, alert: Arc<dyn AlertSink>) -> Self {
        self.alert = Some(alert);
        self
    }

    /// Build the lifecycle
    pub fn build(self) -> StreamLifecycle {
        let (event_tx, _) = broadcast::channel(64);
        StreamLifecycle {
            inner: Arc::new(LifecycleInner {
                provider: self.provider,
                controls: self.controls,
                indicator: self.indicator,
                alert: self.alert.unwrap_or_else(|| Arc::new(LoggingAlert)),
                event_tx,
                core: Mutex::new(LifecycleCore {
                    config: self.config,
                    surface: None,
                    stream: None,
                    state: LifecycleState::Stopped,
                    generation: 0,
                }),
            }),
        }
    }
}

/// Owns acquisition/release of a single camera stream and its display binding
///
/// Cheap to clone; clones share the same state, so a watcher task and the UI
/// layer can drive one lifecycle together.
#[derive(Clone)]
pub struct StreamLifecycle {
    inner: Arc<LifecycleInner>,
}

impl StreamLifecycle {
    /// Create a lifecycle builder for the given capability provider
    pub fn builder(provider: Arc<dyn CapabilityProvider>) -> LifecycleBuilder {
        LifecycleBuilder::new(provider)
    }

    /// Create a lifecycle with default configuration and observers
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self::builder(provider).build()
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.inner.core.lock().state
    }

    /// Current capture configuration
    pub fn config(&self) -> CaptureConfig {
        self.inner.core.lock().config.clone()
    }

    /// Override the capture dimensions, applied on the next configure/start
    pub fn set_size(&self, width: u32, height: u32) {
        self.inner.core.lock().config.set_size(width, height);
    }

    /// Bind the target surface and apply rendering dimensions
    ///
    /// Logs and returns when no surface is provided.
    pub fn configure(&self, surface: Option<SharedSurface>, width: u32, height: u32) {
        let Some(surface) = surface else {
            warn!("configure called without a display surface");
            return;
        };
        {
            let mut core = self.inner.core.lock();
            core.config.set_size(width, height);
            surface.lock().set_dimensions(width, height);
            core.surface = Some(surface);
        }
        self.emit(LifecycleEvent::SurfaceConfigured { width, height });
    }

    /// Acquire a stream and bind it to the configured surface
    ///
    /// Without an available capability provider this reports through the
    /// alert sink and changes nothing. Acquisition failures are logged and
    /// leave the lifecycle stopped. Returns the settled state.
    pub async fn start(&self) -> LifecycleState {
        if !self.inner.provider.is_available() {
            let reason = format!(
                "provider '{}' cannot acquire streams",
                self.inner.provider.name()
            );
            self.inner.alert.alert(NO_SUPPORT_MESSAGE);
            self.emit(LifecycleEvent::CapabilityMissing { reason });
            return self.state();
        }

        let (constraints, generation) = {
            let mut core = self.inner.core.lock();
            match core.state {
                LifecycleState::Starting | LifecycleState::Active => {
                    debug!(state = ?core.state, "start ignored, already starting or active");
                    return core.state;
                }
                LifecycleState::Stopped => {}
            }
            core.state = LifecycleState::Starting;
            (core.config.constraints(), core.generation)
        };

        match self.inner.provider.request_stream(&constraints).await {
            Ok(stream) => self.complete_start(stream, generation),
            Err(err) => {
                warn!(error = %err, "stream acquisition failed");
                let settled = {
                    let mut core = self.inner.core.lock();
                    // Only settle the Starting this call set; a stop that ran
                    // in the meantime owns the state instead
                    if core.generation == generation && core.state == LifecycleState::Starting {
                        core.state = LifecycleState::Stopped;
                    }
                    core.state
                };
                self.emit(LifecycleEvent::AcquisitionFailed {
                    reason: err.to_string(),
                });
                settled
            }
        }
    }

    /// Bind a freshly acquired stream, unless a stop superseded the request
    fn complete_start(&self, stream: CameraStream, generation: u64) -> LifecycleState {
        let stream_id;
        {
            let mut core = self.inner.core.lock();
            if core.generation != generation {
                warn!(stream_id = %stream.id(), "discarding stream acquired before a stop");
                stream.stop_all();
                return core.state;
            }
            match &core.surface {
                Some(surface) => bind_to_surface(surface, &stream),
                None => warn!("no display surface configured, stream left unbound"),
            }
            stream_id = stream.id();
            core.stream = Some(stream);
            core.state = LifecycleState::Active;
        }
        self.set_indicator(true);
        self.notify_controls(ControlsState::streaming());
        self.emit(LifecycleEvent::StreamStarted { stream_id });
        info!(%stream_id, "camera stream active");
        LifecycleState::Active
    }

    /// Release the active stream and reset the surface
    ///
    /// The underlying capability hands out stop handles through acquisition,
    /// so a transient request is made and stopped alongside the held stream.
    /// A failed transient acquisition is logged; teardown still completes, so
    /// an acquired camera is never left running.
    pub async fn stop(&self) {
        let constraints = {
            let mut core = self.inner.core.lock();
            // Invalidate any acquisition still in flight
            core.generation = core.generation.wrapping_add(1);
            core.config.constraints()
        };

        match self.inner.provider.request_stream(&constraints).await {
            Ok(transient) => transient.stop_all(),
            Err(err) => warn!(error = %err, "transient acquisition during stop failed"),
        }

        {
            let mut core = self.inner.core.lock();
            if let Some(stream) = core.stream.take() {
                stream.stop_all();
            }
            if let Some(surface) = &core.surface {
                let mut surface = surface.lock();
                surface.clear_source();
                surface.set_background(INERT_BACKGROUND);
            }
            core.state = LifecycleState::Stopped;
        }
        self.set_indicator(false);
        self.notify_controls(ControlsState::idle());
        self.emit(LifecycleEvent::StreamStopped);
        info!("camera stream stopped");
    }

    /// React to a page-visibility transition
    ///
    /// Hidden releases the stream so the camera never stays live while the
    /// page is backgrounded; visible re-applies the surface configuration and
    /// runs the restart path.
    pub async fn handle_visibility(&self, visible: bool) {
        if visible {
            let (surface, width, height) = {
                let core = self.inner.core.lock();
                (core.surface.clone(), core.config.width, core.config.height)
            };
            self.configure(surface, width, height);
            self.start().await;
        } else {
            self.stop().await;
        }
    }

    /// Keyboard hook: Enter starts the stream
    pub async fn handle_key_up(&self, event: &KeyEvent) {
        if event.is_enter() {
            debug!("enter key received, starting stream");
            self.start().await;
        }
    }

    /// Capture a still at the configured dimensions from the bound surface
    ///
    /// Returns `None` when no surface has been configured.
    pub fn capture_still(&self, sink: Option<&mut dyn SnapshotSink>) -> Option<RasterImage> {
        let (surface, width, height) = {
            let core = self.inner.core.lock();
            (core.surface.clone()?, core.config.width, core.config.height)
        };
        let guard = surface.lock();
        Some(capture_still(&*guard, width, height, sink))
    }

    /// Id of the held stream, if one is active
    pub fn active_stream_id(&self) -> Option<Uuid> {
        self.inner.core.lock().stream.as_ref().map(CameraStream::id)
    }

    fn set_indicator(&self, visible: bool) {
        if let Some(indicator) = &self.inner.indicator {
            if visible {
                indicator.show();
            } else {
                indicator.hide();
            }
        }
    }

    fn notify_controls(&self, state: ControlsState) {
        if let Some(controls) = &self.inner.controls {
            controls.controls_changed(state);
        }
    }

    fn emit(&self, event: LifecycleEvent) {
        let _ = self.inner.event_tx.send(event);
    }
}

fn bind_to_surface(surface: &SharedSurface, stream: &CameraStream) {
    let mut surface = surface.lock();
    if let Err(err) = surface.bind_stream(stream) {
        warn!(error = %err, "direct stream binding rejected, falling back to object URL");
        surface.bind_url(&stream.object_url());
    }
}
