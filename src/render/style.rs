//! Visual encoding of the sweep.
//!
//! Maps each [`Classification`] to a marker color, size and opacity, and
//! fixes the data window every renderer plots into so that frames line up.

use crate::color::Rgba;
use crate::scan::Classification;

/// Pixels per typographic point at 100 dpi.
const PX_PER_PT: f32 = 100.0 / 72.0;

/// Appearance of one sample marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Base color (alpha is taken from `alpha`).
    pub color: Rgba,
    /// Marker area in pt², as plotting libraries size scatter markers.
    pub area: f32,
    /// Opacity in 0.0-1.0.
    pub alpha: f32,
}

impl MarkerStyle {
    /// Create a marker style.
    #[must_use]
    pub const fn new(color: Rgba, area: f32, alpha: f32) -> Self {
        Self { color, area, alpha }
    }

    /// Marker diameter in pixels.
    #[must_use]
    pub fn diameter_px(&self) -> f32 {
        (self.area.sqrt() * PX_PER_PT).max(1.0)
    }

    /// Color with the marker opacity applied.
    #[must_use]
    pub fn fill(&self) -> Rgba {
        self.color
            .with_alpha((self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Full style of a scan frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanStyle {
    /// Samples already emitted.
    pub consumed: MarkerStyle,
    /// The sample being emitted.
    pub current: MarkerStyle,
    /// Samples not emitted yet.
    pub pending: MarkerStyle,
    /// Samples before the first frame has been drawn.
    pub idle: MarkerStyle,
    /// Canvas background.
    pub background: Rgba,
    /// Plot frame, legend border and text.
    pub foreground: Rgba,
    /// Data window on the x axis.
    pub x_range: (f32, f32),
    /// Data window on the y axis; taller than the curve to leave room for the legend.
    pub y_range: (f32, f32),
}

impl Default for ScanStyle {
    fn default() -> Self {
        Self {
            consumed: MarkerStyle::new(Rgba::BLUE, 5.0, 0.5),
            current: MarkerStyle::new(Rgba::rgb(0, 128, 0), 30.0, 1.0),
            pending: MarkerStyle::new(Rgba::RED, 5.0, 0.5),
            idle: MarkerStyle::new(Rgba::rgb(128, 128, 128), 5.0, 0.5),
            background: Rgba::WHITE,
            foreground: Rgba::BLACK,
            x_range: (-1.1, 1.1),
            y_range: (-1.1, 1.4),
        }
    }
}

impl ScanStyle {
    /// Marker style for a classification.
    #[must_use]
    pub fn marker(&self, kind: Classification) -> &MarkerStyle {
        match kind {
            Classification::Consumed => &self.consumed,
            Classification::Current => &self.current,
            Classification::Pending => &self.pending,
        }
    }

    /// Legend entries in display order.
    #[must_use]
    pub fn legend(&self) -> [(Classification, &'static str); 3] {
        Classification::ALL.map(|kind| (kind, legend_label(kind)))
    }

    /// Order in which classes are painted so the current sample ends up on top.
    #[must_use]
    pub const fn paint_order() -> [Classification; 3] {
        [
            Classification::Pending,
            Classification::Consumed,
            Classification::Current,
        ]
    }
}

/// Legend text for a classification.
#[must_use]
pub fn legend_label(kind: Classification) -> &'static str {
    match kind {
        Classification::Consumed => "Sampled",
        Classification::Current => "Currently outputting",
        Classification::Pending => "Remaining samples",
    }
}

/// CSS class name used in vector output.
#[must_use]
pub fn css_class(kind: Classification) -> &'static str {
    match kind {
        Classification::Consumed => "consumed",
        Classification::Current => "current",
        Classification::Pending => "pending",
    }
}
