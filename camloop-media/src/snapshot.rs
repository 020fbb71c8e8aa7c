//! Still-image capture from a display surface
//!
//! Draws the surface's current frame into an off-screen raster of the exact
//! requested dimensions. The operation is pure with respect to the stream
//! lifecycle; a surface with no bound source yields a blank raster.

use crate::frame::VideoFrame;
use crate::surface::DisplaySurface;
use tracing::debug;

/// Off-screen raster produced by a snapshot (RGBA8, row-major)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Create a zeroed raster of the given dimensions
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; VideoFrame::expected_len(width, height)],
        }
    }

    /// Raster width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read the pixel at the given coordinates
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * VideoFrame::BYTES_PER_PIXEL;
        match self.data.get(offset..offset + VideoFrame::BYTES_PER_PIXEL) {
            Some(px) => [px[0], px[1], px[2], px[3]],
            None => [0, 0, 0, 0],
        }
    }

    /// Whether every byte is still zero
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|b| *b == 0)
    }

    fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let offset = (y as usize * self.width as usize + x as usize) * VideoFrame::BYTES_PER_PIXEL;
        if let Some(slot) = self.data.get_mut(offset..offset + VideoFrame::BYTES_PER_PIXEL) {
            slot.copy_from_slice(&px);
        }
    }
}

/// Receives captured stills for display
pub trait SnapshotSink: Send {
    /// Attach a raster as a visible child
    fn attach(&mut self, image: RasterImage);
}

/// Capture a still image from the surface's current frame
///
/// The raster is always exactly `width x height`; the source frame is scaled
/// to fit regardless of its native resolution. Callers are responsible for
/// only capturing surfaces with an active bound source; without one the
/// raster is blank and no error is raised. When `sink` is given, a copy of
/// the raster is attached to it.
pub fn capture_still(
    surface: &dyn DisplaySurface,
    width: u32,
    height: u32,
    sink: Option<&mut dyn SnapshotSink>,
) -> RasterImage {
    let mut raster = RasterImage::blank(width, height);
    match surface.current_frame() {
        Some(frame) => scale_into(&frame, &mut raster),
        None => debug!("snapshot with no bound source, raster left blank"),
    }
    if let Some(sink) = sink {
        sink.attach(raster.clone());
    }
    raster
}

/// Nearest-neighbor scale of a frame into the raster
fn scale_into(frame: &VideoFrame, target: &mut RasterImage) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    for y in 0..target.height {
        let sy = (y as u64 * frame.height as u64 / target.height as u64) as u32;
        for x in 0..target.width {
            let sx = (x as u64 * frame.width as u64 / target.width as u64) as u32;
            target.put_pixel(x, y, frame.pixel(sx, sy));
        }
    }
}
