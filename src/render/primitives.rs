//! Primitive rendering functions.
//!
//! Rasterizes the few shapes a scan frame is made of: filled (optionally
//! translucent) circles for samples and rectangle outlines for the plot frame
//! and legend.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Draw a filled circle.
///
/// Opaque colors overwrite pixels; translucent colors are alpha-blended.
/// Each covered pixel is touched exactly once, so overlapping spans never
/// darken the marker.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `cx`, `cy` - Center coordinates
/// * `radius` - Circle radius in pixels
/// * `color` - Fill color
pub fn fill_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius < 0 {
        return;
    }

    let r2 = radius * radius;
    for dy in -radius..=radius {
        let y = cy + dy;
        if y < 0 || y >= fb.height() as i32 {
            continue;
        }
        // Half-width of the span on this row.
        let half = f64::from(r2 - dy * dy).sqrt() as i32;
        draw_span(fb, cx - half, cx + half, y, color);
    }
}

/// Draw a sample marker of the given diameter centred at a sub-pixel position.
pub fn draw_marker(fb: &mut Framebuffer, x: f32, y: f32, diameter: f32, color: Rgba) {
    let radius = (diameter / 2.0).round() as i32;
    fill_circle(fb, x.round() as i32, y.round() as i32, radius, color);
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(
            x + width - thickness,
            y + thickness,
            thickness,
            height - 2 * thickness,
            color,
        );
    }
}

/// Horizontal run of pixels from `x1` to `x2` inclusive, clipped to the buffer.
#[inline]
fn draw_span(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    let x_start = x1.max(0);
    let x_end = (x2 + 1).min(fb.width() as i32);
    if x_start >= x_end {
        return;
    }

    if color.a == 255 {
        fb.fill_rect(x_start as u32, y as u32, (x_end - x_start) as u32, 1, color);
    } else {
        for x in x_start..x_end {
            fb.blend_pixel(x as u32, y as u32, color);
        }
    }
}
