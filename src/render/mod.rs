//! Rasterization and visual encoding of scan frames.
//!
//! # Algorithms
//!
//! - **Scanline Circle**: filled circles, alpha-blended exactly once per pixel
//! - **Fixed Data Window**: aspect-preserving data-to-pixel layout shared by
//!   every renderer

mod layout;
mod primitives;
mod style;

pub use layout::{LinearScale, PlotLayout};
pub use primitives::{draw_marker, draw_rect_outline, fill_circle};
pub use style::{css_class, legend_label, MarkerStyle, ScanStyle};
