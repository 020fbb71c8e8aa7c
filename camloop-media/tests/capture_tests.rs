//! Integration tests for acquisition, surface binding, and snapshot capture
//!
//! These exercise the provider/surface/snapshot seams together, the way the
//! lifecycle layer drives them.

use camloop_media::*;

// ============================================================================
// ACQUISITION TESTS
// ============================================================================

#[tokio::test]
async fn test_stream_constraints_default() {
    let constraints = StreamConstraints::default();

    assert!(constraints.video);
    assert_eq!(constraints.resolution.width, 640);
    assert_eq!(constraints.resolution.height, 480);
}

#[tokio::test]
async fn test_detect_provider_selects_standard_first() {
    let provider = detect_provider().unwrap();
    assert_eq!(provider.name(), "standard");
    assert!(provider.is_available());
}

#[tokio::test]
async fn test_acquired_stream_is_active() {
    let provider = MockCapability::available();
    let stream = provider
        .request_stream(&StreamConstraints::default())
        .await
        .unwrap();

    assert!(stream.is_active());
    assert!(!stream.tracks().is_empty());

    stream.stop_all();
    assert!(!stream.is_active());
    assert_eq!(provider.live_stream_count(), 0);
}

#[tokio::test]
async fn test_unavailable_provider_refuses_acquisition() {
    let provider = MockCapability::unavailable();
    let err = provider
        .request_stream(&StreamConstraints::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CaptureError::CapabilityUnavailable { .. }));
    assert_eq!(err.category(), ErrorCategory::Capability);
}

// ============================================================================
// SURFACE BINDING TESTS
// ============================================================================

#[tokio::test]
async fn test_stream_binding_feeds_surface_frames() {
    let provider = MockCapability::available();
    let stream = provider
        .request_stream(&StreamConstraints::default())
        .await
        .unwrap();

    let mut surface = VideoSurface::new();
    surface.bind_stream(&stream).unwrap();

    let frame = surface.current_frame().unwrap();
    assert_eq!(frame.resolution(), Resolution::VGA);

    // New frames published to the stream are visible through the surface
    stream.publish_frame(VideoFrame::filled(640, 480, [1, 2, 3, 255], 42));
    let frame = surface.current_frame().unwrap();
    assert_eq!(frame.timestamp, 42);
}

#[tokio::test]
async fn test_legacy_surface_uses_url_fallback() {
    let provider = MockCapability::available().with_origin(StreamOrigin::Legacy);
    let stream = provider
        .request_stream(&StreamConstraints::default())
        .await
        .unwrap();
    assert_eq!(stream.origin(), StreamOrigin::Legacy);

    let mut surface = VideoSurface::without_stream_binding();
    assert!(surface.bind_stream(&stream).is_err());

    surface.bind_url(&stream.object_url());
    assert!(surface.has_source());
}

#[tokio::test]
async fn test_shared_surface_handle() {
    let surface = shared_surface(VideoSurface::new());
    surface.lock().set_dimensions(320, 240);
    assert_eq!(surface.lock().dimensions(), (320, 240));
}

// ============================================================================
// SNAPSHOT TESTS
// ============================================================================

#[tokio::test]
async fn test_snapshot_dimensions_independent_of_native_resolution() {
    let provider = MockCapability::available();
    let stream = provider
        .request_stream(&StreamConstraints {
            video: true,
            resolution: Resolution::QVGA,
        })
        .await
        .unwrap();

    let mut surface = VideoSurface::new();
    surface.bind_stream(&stream).unwrap();

    let raster = capture_still(&surface, 640, 480, None);
    assert_eq!(raster.width(), 640);
    assert_eq!(raster.height(), 480);
    assert!(!raster.is_blank());
}

#[tokio::test]
async fn test_snapshot_after_stop_is_blank() {
    let provider = MockCapability::available();
    let stream = provider
        .request_stream(&StreamConstraints::default())
        .await
        .unwrap();

    let mut surface = VideoSurface::new();
    surface.bind_stream(&stream).unwrap();
    stream.stop_all();

    // The stream's frame cell was cleared with its tracks
    let raster = capture_still(&surface, 640, 480, None);
    assert!(raster.is_blank());
}
