//! Raster renderer exporting an animated PNG.
//!
//! Snapshots are cheap (one byte per sample), so `draw` only records them and
//! `export` rasterizes and encodes frame by frame. Memory stays at one
//! framebuffer regardless of run length.

use super::{check_point_count, Renderer};
use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::curve::SampleBuffer;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{ApngEncoder, PngEncoder};
use crate::render::{draw_marker, draw_rect_outline, MarkerStyle, PlotLayout, ScanStyle};
use crate::scan::{Classification, RenderSnapshot};
use log::debug;
use std::path::Path;

/// Track color of the progress bar.
const TRACK: Rgba = Rgba::rgb(220, 220, 220);

/// Height of the progress bar in pixels.
const BAR_HEIGHT: u32 = 4;

/// Draws snapshots into framebuffers and exports them as APNG.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    buffer: SampleBuffer,
    style: ScanStyle,
    layout: PlotLayout,
    fps: u16,
    positions: Vec<(f32, f32)>,
    backdrop: Framebuffer,
    snapshots: Vec<RenderSnapshot>,
}

impl RasterRenderer {
    /// Create a renderer for `buffer` with the default style.
    ///
    /// # Errors
    ///
    /// Returns an error if the output surface is invalid.
    pub fn new(buffer: SampleBuffer, render: &RenderConfig) -> Result<Self> {
        Self::with_style(buffer, render, ScanStyle::default())
    }

    /// Create a renderer with a custom style.
    ///
    /// # Errors
    ///
    /// Returns an error if the output surface or data window is invalid.
    pub fn with_style(buffer: SampleBuffer, render: &RenderConfig, style: ScanStyle) -> Result<Self> {
        let layout = PlotLayout::new(render, style.x_range, style.y_range)?;
        let positions = buffer.iter().map(|p| layout.to_pixel(p.x, p.y)).collect();
        let backdrop = paint_backdrop(&layout, &style)?;

        Ok(Self {
            buffer,
            style,
            layout,
            fps: render.fps,
            positions,
            backdrop,
            snapshots: Vec::new(),
        })
    }

    /// Number of frames drawn so far.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Layout used to place samples.
    #[must_use]
    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    /// Pixel position of sample `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<(f32, f32)> {
        self.positions.get(index).copied()
    }

    /// Rasterize every sample in the idle color, as shown before the first tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffer cannot be created.
    pub fn render_idle(&self) -> Result<Framebuffer> {
        let mut fb = self.backdrop.clone();
        for &(x, y) in &self.positions {
            self.paint_marker(&mut fb, x, y, &self.style.idle);
        }
        Ok(fb)
    }

    /// Rasterize one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot does not match the buffer length.
    pub fn render_frame(&self, snapshot: &RenderSnapshot) -> Result<Framebuffer> {
        check_point_count(snapshot, self.buffer.len())?;

        let mut fb = self.backdrop.clone();
        for kind in ScanStyle::paint_order() {
            let marker = self.style.marker(kind);
            for i in snapshot.indices(kind) {
                let (x, y) = self.positions[i];
                self.paint_marker(&mut fb, x, y, marker);
            }
        }
        self.paint_progress(&mut fb, snapshot);
        Ok(fb)
    }

    /// Rasterize the most recent snapshot into a still PNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToExport`] if nothing was drawn, or any
    /// encoding error.
    pub fn export_still(&self, path: &Path) -> Result<()> {
        let last = self.snapshots.last().ok_or(Error::NothingToExport)?;
        PngEncoder::write_to_file(&self.render_frame(last)?, path)
    }

    /// Encode every drawn frame as APNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToExport`] if nothing was drawn, or any
    /// encoding error.
    pub fn to_apng_bytes(&self) -> Result<Vec<u8>> {
        self.encoder()?
            .to_bytes(self.encoded_frame_count()?, self.frames())
    }

    fn encoder(&self) -> Result<ApngEncoder> {
        ApngEncoder::new(self.layout.width(), self.layout.height(), self.fps)
    }

    fn encoded_frame_count(&self) -> Result<u32> {
        u32::try_from(self.snapshots.len()).map_err(|_| {
            Error::invalid_config("frame_count", "too many frames for a single animation")
        })
    }

    fn frames(&self) -> impl Iterator<Item = Result<Framebuffer>> + '_ {
        self.snapshots.iter().map(|s| self.render_frame(s))
    }

    fn paint_marker(&self, fb: &mut Framebuffer, x: f32, y: f32, marker: &MarkerStyle) {
        draw_marker(fb, x, y, marker.diameter_px(), marker.fill());
    }

    /// Progress bar along the bottom margin: consumed share, then the current sample.
    fn paint_progress(&self, fb: &mut Framebuffer, snapshot: &RenderSnapshot) {
        let margin = self.layout.margin();
        if margin < 2 * BAR_HEIGHT {
            return;
        }

        let (left, _, width, _) = self.layout.plot_rect();
        let bar_y = self.layout.height() - margin / 2 - BAR_HEIGHT / 2;
        let bar_w = width.max(1.0);
        fb.fill_rect(left as u32, bar_y, bar_w as u32, BAR_HEIGHT, TRACK);

        let n = snapshot.point_count() as f32;
        let done = bar_w * snapshot.count(Classification::Consumed) as f32 / n;
        fb.fill_rect(
            left as u32,
            bar_y,
            done as u32,
            BAR_HEIGHT,
            self.style.consumed.color,
        );

        let tick_w = (bar_w / n).ceil().max(1.0);
        fb.fill_rect(
            (left + done) as u32,
            bar_y,
            tick_w as u32,
            BAR_HEIGHT,
            self.style.current.color,
        );
    }
}

/// Background, plot frame and legend swatches shared by every frame.
fn paint_backdrop(layout: &PlotLayout, style: &ScanStyle) -> Result<Framebuffer> {
    let mut fb = Framebuffer::new(layout.width(), layout.height())?;
    fb.clear(style.background);

    let (left, top, width, height) = layout.plot_rect();
    draw_rect_outline(
        &mut fb,
        left as i32,
        top as i32,
        width as u32,
        height as u32,
        style.foreground,
        1,
    );

    // Legend in the headroom above the curve (y > 0.9), top-right corner.
    let (lx0, ly0) = layout.to_pixel(0.55, 1.35);
    let (lx1, ly1) = layout.to_pixel(1.05, 0.98);
    draw_rect_outline(
        &mut fb,
        lx0 as i32,
        ly0 as i32,
        (lx1 - lx0) as u32,
        (ly1 - ly0) as u32,
        style.foreground,
        1,
    );
    let row_h = (ly1 - ly0) / 3.0;
    for (row, (kind, _)) in style.legend().into_iter().enumerate() {
        let marker = style.marker(kind);
        let cy = ly0 + row_h * (row as f32 + 0.5);
        draw_marker(&mut fb, lx0 + row_h / 2.0, cy, marker.diameter_px(), marker.fill());
    }

    Ok(fb)
}

impl Renderer for RasterRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        check_point_count(snapshot, self.buffer.len())?;
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn export(&mut self, path: &Path) -> Result<()> {
        if self.snapshots.is_empty() {
            return Err(Error::NothingToExport);
        }
        let count = self.encoded_frame_count()?;
        debug!("encoding {count} frames to {}", path.display());
        self.encoder()?.write_to_file(path, count, self.frames())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::generate;
    use crate::scan::classify;

    fn small_render() -> RenderConfig {
        RenderConfig {
            width: 120,
            height: 120,
            margin: 10,
            fps: 30,
        }
    }

    fn renderer(n: usize) -> RasterRenderer {
        RasterRenderer::new(generate(n, 1).unwrap(), &small_render()).unwrap()
    }

    #[test]
    fn test_current_sample_painted_green() {
        let r = renderer(64);
        let snap = classify(64, 10).unwrap();
        let fb = r.render_frame(&snap).unwrap();

        let (x, y) = r.position(10).unwrap();
        let pixel = fb.get_pixel(x.round() as u32, y.round() as u32).unwrap();
        assert_eq!(pixel, ScanStyle::default().current.color);
    }

    #[test]
    fn test_frame_differs_from_idle() {
        let r = renderer(64);
        let idle = r.render_idle().unwrap();
        let frame = r.render_frame(&classify(64, 30).unwrap()).unwrap();
        assert_ne!(idle.to_compact_pixels(), frame.to_compact_pixels());
    }

    #[test]
    fn test_idle_frame_has_ink() {
        let r = renderer(64);
        let (min, max, mean) = r.render_idle().unwrap().luminance_stats();
        assert!(min < 0.1);
        assert!((max - 1.0).abs() < 1e-6);
        assert!(mean > 0.8);
    }

    #[test]
    fn test_frozen_frames_render_identically() {
        let r = renderer(32);
        let last = r.render_frame(&classify(32, 31).unwrap()).unwrap();
        let over = r.render_frame(&classify(32, 80).unwrap()).unwrap();
        assert_eq!(last.to_compact_pixels(), over.to_compact_pixels());
    }

    #[test]
    fn test_draw_rejects_mismatched_snapshot() {
        let mut r = renderer(16);
        assert!(r.draw(&classify(17, 0).unwrap()).is_err());
        assert_eq!(r.frame_count(), 0);
    }

    #[test]
    fn test_apng_bytes_after_draws() {
        let mut r = renderer(16);
        for frame in 0..3 {
            r.draw(&classify(16, frame).unwrap()).unwrap();
        }
        let bytes = r.to_apng_bytes().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert!(bytes.windows(4).any(|w| w == b"acTL"));
    }

    #[test]
    fn test_export_without_frames_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut r = renderer(16);
        let result = r.export(&dir.path().join("scan.png"));
        assert!(matches!(result, Err(Error::NothingToExport)));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        let mut r = renderer(16);
        r.draw(&classify(16, 0).unwrap()).unwrap();
        r.draw(&classify(16, 1).unwrap()).unwrap();
        r.export(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_still() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        let mut r = renderer(16);
        assert!(r.export_still(&path).is_err());
        r.draw(&classify(16, 5).unwrap()).unwrap();
        r.export_still(&path).unwrap();
        assert!(path.exists());
    }
}
