//! SVG output encoder.
//!
//! Vector output for single snapshots. Scales cleanly for documentation pages
//! where a raster animation would be too heavy.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Document title, emitted as `<title>`
    title: Option<String>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
        rx: f32,
    },
    /// Circle, optionally tagged with a CSS class
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        class: Option<&'static str>,
    },
    /// Polyline (connected line segments)
    Polyline {
        points: Vec<(f32, f32)>,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 800)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            title: None,
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Set the document title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Number of elements added so far.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Add an unfilled rectangle outline.
    #[must_use]
    pub fn rect_outline(
        mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        stroke: Rgba,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill: None,
            stroke: Some(stroke),
            stroke_width,
            rx: 0.0,
        });
        self
    }

    /// Add a filled, outlined box with rounded corners.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn rounded_box(
        mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Rgba,
        rx: f32,
    ) -> Self {
        self.elements.push(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill: Some(fill),
            stroke: Some(stroke),
            stroke_width: 1.0,
            rx,
        });
        self
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(mut self, cx: f32, cy: f32, r: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            class: None,
        });
        self
    }

    /// Add a circle tagged with a CSS class.
    #[must_use]
    pub fn circle_classed(
        mut self,
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
        class: &'static str,
    ) -> Self {
        self.elements.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            class: Some(class),
        });
        self
    }

    /// Add a polyline.
    #[must_use]
    pub fn polyline(mut self, points: &[(f32, f32)], stroke: Rgba, stroke_width: f32) -> Self {
        self.elements.push(SvgElement::Polyline {
            points: points.to_vec(),
            stroke,
            stroke_width,
        });
        self
    }

    /// Add text.
    #[must_use]
    pub fn text(self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.text_anchored(x, y, text, font_size, fill, TextAnchor::Start)
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
        });
        self
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(64 * (self.elements.len() + 4));

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(title) = &self.title {
            let _ = writeln!(svg, "  <title>{}</title>", escape_xml(title));
        }

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                rgba_to_css(&bg)
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Convert RGBA to CSS color string.
fn rgba_to_css(color: &Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
            stroke_width,
            rx,
        } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), |f| rgba_to_css(&f));
            let stroke_attr = stroke
                .map(|s| {
                    format!(
                        r#" stroke="{}" stroke-width="{}""#,
                        rgba_to_css(&s),
                        stroke_width
                    )
                })
                .unwrap_or_default();
            let rx_attr = if *rx > 0.0 {
                format!(r#" rx="{rx}""#)
            } else {
                String::new()
            };
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}"{rx_attr} fill="{fill_attr}"{stroke_attr}/>"#
            )
        }
        SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            class,
        } => {
            let class_attr = class
                .map(|c| format!(r#" class="{c}""#))
                .unwrap_or_default();
            format!(
                r#"<circle{class_attr} cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
                rgba_to_css(fill)
            )
        }
        SvgElement::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let points_str = points
                .iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width}"/>"#,
                rgba_to_css(stroke)
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}" font-family="sans-serif">{}</text>"#,
                rgba_to_css(fill),
                escape_xml(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_title_escaped() {
        let svg = SvgEncoder::new(10, 10).title("Scan <demo>").render();
        assert!(svg.contains("<title>Scan &lt;demo&gt;</title>"));
    }

    #[test]
    fn test_svg_rect_outline() {
        let svg = SvgEncoder::new(100, 100)
            .rect_outline(10.0, 20.0, 30.0, 40.0, Rgba::BLACK, 2.0)
            .render();

        assert!(svg.contains(r#"<rect x="10" y="20" width="30" height="40" fill="none""#));
        assert!(svg.contains("stroke=\"rgb(0,0,0)\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_rounded_box() {
        let svg = SvgEncoder::new(100, 100)
            .rounded_box(5.0, 5.0, 50.0, 20.0, Rgba::WHITE, Rgba::BLACK, 4.0)
            .render();

        assert!(svg.contains("rx=\"4\""));
        assert!(svg.contains("fill=\"rgb(255,255,255)\""));
    }

    #[test]
    fn test_svg_circle() {
        let svg = SvgEncoder::new(100, 100)
            .circle(50.0, 50.0, 25.0, Rgba::BLUE)
            .render();

        assert!(svg.contains(r#"<circle cx="50" cy="50" r="25" fill="rgb(0,0,255)"/>"#));
    }

    #[test]
    fn test_svg_circle_classed() {
        let svg = SvgEncoder::new(100, 100)
            .circle_classed(1.0, 2.0, 3.0, Rgba::RED, "pending")
            .render();

        assert!(svg.contains(r#"<circle class="pending""#));
    }

    #[test]
    fn test_svg_polyline() {
        let points = vec![(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)];
        let svg = SvgEncoder::new(100, 100)
            .polyline(&points, Rgba::GREEN, 1.5)
            .render();

        assert!(svg.contains("<polyline"));
        assert!(svg.contains("points=\"0,0 50,100 100,0\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "<script>alert('xss')</script>", 12.0, Rgba::BLACK)
            .render();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_svg_text_anchored_end() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(90.0, 50.0, "Right", 12.0, Rgba::BLACK, TextAnchor::End)
            .render();

        assert!(svg.contains("text-anchor=\"end\""));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_svg_rgba_alpha() {
        let css = rgba_to_css(&Rgba::new(255, 0, 0, 128));
        assert!(css.contains("rgba"));
        assert!(css.contains("0.502"));
    }

    #[test]
    fn test_svg_element_count() {
        let encoder = SvgEncoder::new(10, 10)
            .circle(1.0, 1.0, 1.0, Rgba::RED)
            .text(0.0, 0.0, "x", 8.0, Rgba::BLACK);
        assert_eq!(encoder.element_count(), 2);
    }

    #[test]
    fn test_svg_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        SvgEncoder::new(100, 100)
            .circle(10.0, 10.0, 5.0, Rgba::BLUE)
            .write_to_file(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
        assert!(content.ends_with("</svg>\n"));
    }
}
