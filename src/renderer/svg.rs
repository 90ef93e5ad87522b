//! Vector renderer for a single snapshot.

use super::{check_point_count, Renderer};
use crate::color::Rgba;
use crate::config::RenderConfig;
use crate::curve::SampleBuffer;
use crate::error::{Error, Result};
use crate::output::{SvgEncoder, TextAnchor};
use crate::render::{css_class, PlotLayout, ScanStyle};
use crate::scan::RenderSnapshot;
use log::debug;
use std::path::Path;

const FONT_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 14.0;
const TRAIL_WIDTH: f32 = 0.75;
const STATUS_FILL: Rgba = Rgba::new(255, 255, 255, 179);

/// Renders the latest snapshot as SVG with legend and status text.
///
/// Only the most recent frame is kept; `export` writes it out.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    buffer: SampleBuffer,
    style: ScanStyle,
    layout: PlotLayout,
    latest: Option<RenderSnapshot>,
}

impl SvgRenderer {
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
        Ok(Self {
            buffer,
            style,
            layout,
            latest: None,
        })
    }

    /// Most recently drawn snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<&RenderSnapshot> {
        self.latest.as_ref()
    }

    /// Build the SVG document for a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot does not match the buffer length.
    pub fn document(&self, snapshot: &RenderSnapshot) -> Result<SvgEncoder> {
        check_point_count(snapshot, self.buffer.len())?;

        let style = &self.style;
        let title = format!(
            "Scanning demo: {} points, pattern {}",
            self.buffer.len(),
            self.buffer.pattern_index()
        );
        let (left, top, width, height) = self.layout.plot_rect();

        let mut svg = SvgEncoder::new(self.layout.width(), self.layout.height())
            .background(Some(style.background))
            .title(&title)
            .text_anchored(
                self.layout.width() as f32 / 2.0,
                top - 8.0,
                &title,
                TITLE_SIZE,
                style.foreground,
                TextAnchor::Middle,
            )
            .rect_outline(left, top, width, height, style.foreground, 1.0);

        svg = self.trail(svg, snapshot);
        for kind in ScanStyle::paint_order() {
            let marker = style.marker(kind);
            let r = marker.diameter_px() / 2.0;
            for i in snapshot.indices(kind) {
                let p = &self.buffer[i];
                let (cx, cy) = self.layout.to_pixel(p.x, p.y);
                svg = svg.circle_classed(cx, cy, r, marker.fill(), css_class(kind));
            }
        }

        svg = self.legend(svg);
        Ok(self.status(svg, snapshot))
    }

    /// Path the beam has already traced, from sample 0 to the current one.
    fn trail(&self, svg: SvgEncoder, snapshot: &RenderSnapshot) -> SvgEncoder {
        let current = snapshot.current_index();
        if current == 0 {
            return svg;
        }
        let points: Vec<(f32, f32)> = self.buffer.points()[..=current]
            .iter()
            .map(|p| self.layout.to_pixel(p.x, p.y))
            .collect();
        svg.polyline(&points, self.style.consumed.fill(), TRAIL_WIDTH)
    }

    /// Legend box in the top-right headroom.
    fn legend(&self, mut svg: SvgEncoder) -> SvgEncoder {
        let style = &self.style;
        let (x0, y0) = self.layout.to_pixel(0.35, 1.35);
        let (x1, y1) = self.layout.to_pixel(1.05, 0.98);
        svg = svg.rounded_box(x0, y0, x1 - x0, y1 - y0, Rgba::WHITE, style.foreground, 4.0);

        let row_h = (y1 - y0) / 3.0;
        for (row, (kind, label)) in style.legend().into_iter().enumerate() {
            let marker = style.marker(kind);
            let cy = y0 + row_h * (row as f32 + 0.5);
            svg = svg
                .circle(x0 + row_h / 2.0, cy, marker.diameter_px() / 2.0, marker.fill())
                .text(x0 + row_h, cy + FONT_SIZE / 3.0, label, FONT_SIZE, style.foreground);
        }
        svg
    }

    /// Status box in the top-left headroom, one text element per line.
    fn status(&self, mut svg: SvgEncoder, snapshot: &RenderSnapshot) -> SvgEncoder {
        let style = &self.style;
        let (x0, y0) = self.layout.to_pixel(-1.05, 1.35);
        let status = snapshot.status_line();
        let lines: Vec<&str> = status.lines().collect();
        let box_h = FONT_SIZE * 1.4 * lines.len() as f32 + FONT_SIZE * 0.6;

        svg = svg.rounded_box(x0, y0, FONT_SIZE * 13.0, box_h, STATUS_FILL, style.foreground, 4.0);
        for (i, line) in lines.iter().enumerate() {
            let y = y0 + FONT_SIZE * 1.4 * (i as f32 + 1.0);
            svg = svg.text(x0 + FONT_SIZE / 2.0, y, line, FONT_SIZE, style.foreground);
        }
        svg
    }
}

impl Renderer for SvgRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        check_point_count(snapshot, self.buffer.len())?;
        self.latest = Some(snapshot.clone());
        Ok(())
    }

    fn export(&mut self, path: &Path) -> Result<()> {
        let latest = self.latest.as_ref().ok_or(Error::NothingToExport)?;
        debug!("writing frame {} to {}", latest.frame(), path.display());
        self.document(latest)?.write_to_file(path)
    }
}
