//! Data-to-pixel mapping for scan frames.
//!
//! Every renderer plots into the same fixed data window (see
//! [`ScanStyle`](super::ScanStyle)), so a sample lands on the same pixel in
//! every frame regardless of which classes are visible.

use crate::config::RenderConfig;
use crate::error::{Error, Result};

/// Linear mapping from a data interval onto a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale. Returns `None` for an empty domain.
    #[must_use]
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Option<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return None;
        }

        Some(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Transform a domain value to a range value.
    #[must_use]
    pub fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }
}

/// Placement of the plot area on the output surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotLayout {
    width: u32,
    height: u32,
    margin: u32,
    x: LinearScale,
    y: LinearScale,
}

impl PlotLayout {
    /// Lay out a square-aspect plot of the given data window.
    ///
    /// The plot area is the largest rectangle inside the margins whose aspect
    /// ratio matches the data window, centred on the surface, so the curve is
    /// never stretched.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is too small or a window is empty.
    pub fn new(render: &RenderConfig, x_range: (f32, f32), y_range: (f32, f32)) -> Result<Self> {
        render.validate()?;

        let data_w = x_range.1 - x_range.0;
        let data_h = y_range.1 - y_range.0;
        if data_w <= 0.0 {
            return Err(Error::invalid_config("x_range", "window must have positive width"));
        }
        if data_h <= 0.0 {
            return Err(Error::invalid_config("y_range", "window must have positive height"));
        }

        let avail_w = (render.width - 2 * render.margin) as f32;
        let avail_h = (render.height - 2 * render.margin) as f32;
        let px_per_unit = (avail_w / data_w).min(avail_h / data_h);
        let plot_w = data_w * px_per_unit;
        let plot_h = data_h * px_per_unit;
        let left = (render.width as f32 - plot_w) / 2.0;
        let top = (render.height as f32 - plot_h) / 2.0;

        let x = LinearScale::new(x_range, (left, left + plot_w))
            .ok_or_else(|| Error::invalid_config("x_range", "window must have positive width"))?;
        // Screen y grows downward.
        let y = LinearScale::new(y_range, (top + plot_h, top))
            .ok_or_else(|| Error::invalid_config("y_range", "window must have positive height"))?;

        Ok(Self {
            width: render.width,
            height: render.height,
            margin: render.margin,
            x,
            y,
        })
    }

    /// Surface width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Margin around the plot area.
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Pixel position of a data point.
    #[must_use]
    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        (self.x.scale(x as f32), self.y.scale(y as f32))
    }

    /// Plot area as `(left, top, width, height)` in pixels.
    #[must_use]
    pub fn plot_rect(&self) -> (f32, f32, f32, f32) {
        let (left, right) = (self.x.range_min, self.x.range_max);
        let (bottom, top) = (self.y.range_min, self.y.range_max);
        (left, top, right - left, bottom - top)
    }
}
