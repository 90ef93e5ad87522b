//! Terminal output encoder (ASCII/ANSI).
//!
//! Renders framebuffers to terminal-compatible text so the sweep can be
//! watched without leaving the shell:
//! - ASCII: uses characters like ` .:-=+*#%@` for grayscale
//! - ANSI: 24-bit background colors, one cell per sample area
//!
//! In animated mode each frame is prefixed with a cursor-home escape so that
//! successive frames overwrite each other in place.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;
use std::io::{self, Write};

/// Move the cursor to the top-left corner.
const CURSOR_HOME: &str = "\x1b[H";
/// Clear the screen.
const CLEAR_SCREEN: &str = "\x1b[2J";
/// Reset colors.
const RESET: &str = "\x1b[0m";

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Full cells with ANSI 24-bit color
    #[default]
    AnsiTrueColor,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: u32,
    animate: bool,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Approximate width/height ratio of a monospace cell.
    const CHAR_ASPECT: f32 = 2.0;

    /// Create a new encoder: ANSI color, 80 columns, no in-place redraw.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: TerminalMode::default(),
            width: 80,
            animate: false,
        }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target width in characters.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }

    /// Redraw frames in place instead of scrolling.
    #[must_use]
    pub fn animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Target (columns, rows) for a framebuffer, preserving aspect ratio.
    #[must_use]
    pub fn dimensions(&self, fb: &Framebuffer) -> (u32, u32) {
        let w = self.width.min(fb.width());
        let aspect = fb.width() as f32 / fb.height() as f32;
        let h = (w as f32 / aspect / Self::CHAR_ASPECT).round() as u32;
        (w, h.max(1))
    }

    /// Render a framebuffer with an optional caption below it.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer, caption: Option<&str>) -> String {
        let (cols, rows) = self.dimensions(fb);
        let cell_bytes = match self.mode {
            TerminalMode::Ascii => 1,
            TerminalMode::AnsiTrueColor => 20,
        };
        let mut output = String::with_capacity((cols as usize * cell_bytes + 8) * rows as usize);

        if self.animate {
            output.push_str(CURSOR_HOME);
        }

        let scale_x = fb.width() as f32 / cols as f32;
        let scale_y = fb.height() as f32 / rows as f32;

        for y in 0..rows {
            for x in 0..cols {
                let px = sample(fb, x, y, scale_x, scale_y);
                match self.mode {
                    TerminalMode::Ascii => output.push(Self::ramp_char(px.luminance())),
                    TerminalMode::AnsiTrueColor => {
                        let _ = write!(output, "\x1b[48;2;{};{};{}m ", px.r, px.g, px.b);
                    }
                }
            }
            if self.mode == TerminalMode::AnsiTrueColor {
                output.push_str(RESET);
            }
            output.push('\n');
        }

        if let Some(caption) = caption {
            for line in caption.lines() {
                // Pad so a shorter caption fully overwrites the previous one.
                let _ = writeln!(output, "{line:<width$}", width = cols as usize);
            }
        }

        output
    }

    /// Write a rendered frame to `out`, clearing the screen first when animating.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from `out`.
    pub fn write_frame<W: Write>(
        &self,
        out: &mut W,
        fb: &Framebuffer,
        caption: Option<&str>,
        first: bool,
    ) -> io::Result<()> {
        if self.animate && first {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        out.write_all(self.render(fb, caption).as_bytes())?;
        out.flush()
    }

    /// Convert luminance (0.0-1.0) to a character from the ASCII ramp.
    fn ramp_char(luma: f32) -> char {
        let idx = (luma * (Self::ASCII_RAMP.len() - 1) as f32).round() as usize;
        Self::ASCII_RAMP[idx.min(Self::ASCII_RAMP.len() - 1)]
    }
}

/// Sample the framebuffer color at a scaled cell position.
fn sample(fb: &Framebuffer, x: u32, y: u32, scale_x: f32, scale_y: f32) -> Rgba {
    let fx = (x as f32 * scale_x).min((fb.width() - 1) as f32);
    let fy = (y as f32 * scale_y).min((fb.height() - 1) as f32);

    fb.get_pixel(fx as u32, fy as u32).unwrap_or(Rgba::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(color: Rgba) -> Framebuffer {
        let mut fb = Framebuffer::new(20, 20).expect("framebuffer creation should succeed");
        fb.clear(color);
        fb
    }

    #[test]
    fn test_ascii_white_is_brightest() {
        let encoder = TerminalEncoder::new().mode(TerminalMode::Ascii).width(10);
        let output = encoder.render(&filled(Rgba::WHITE), None);

        assert!(output.contains('@'));
        assert!(!output.contains(' '));
    }

    #[test]
    fn test_ascii_black_is_blank() {
        let encoder = TerminalEncoder::new().mode(TerminalMode::Ascii).width(10);
        let output = encoder.render(&filled(Rgba::BLACK), None);
        assert!(output.lines().all(|l| l.chars().all(|c| c == ' ')));
    }

    #[test]
    fn test_ansi_emits_color_codes() {
        let output = TerminalEncoder::new().width(4).render(&filled(Rgba::RED), None);
        assert!(output.contains("\x1b[48;2;255;0;0m"));
        assert!(output.contains(RESET));
    }

    #[test]
    fn test_dimensions_preserve_aspect() {
        let fb = Framebuffer::new(200, 100).unwrap();
        let (cols, rows) = TerminalEncoder::new().width(40).dimensions(&fb);
        assert_eq!(cols, 40);
        assert_eq!(rows, 10);
    }

    #[test]
    fn test_caption_lines_appended() {
        let output = TerminalEncoder::new()
            .mode(TerminalMode::Ascii)
            .width(10)
            .render(&filled(Rgba::WHITE), Some("Current sample: 3\nSamples remaining: 4"));
        assert!(output.contains("Current sample: 3"));
        assert!(output.contains("Samples remaining: 4"));
    }

    #[test]
    fn test_animate_homes_cursor() {
        let output = TerminalEncoder::new()
            .animate(true)
            .width(4)
            .render(&filled(Rgba::BLUE), None);
        assert!(output.starts_with(CURSOR_HOME));
    }

    #[test]
    fn test_write_frame_clears_first() {
        let encoder = TerminalEncoder::new().animate(true).width(4);
        let fb = filled(Rgba::GREEN);
        let mut out = Vec::new();
        encoder.write_frame(&mut out, &fb, None, true).unwrap();
        encoder.write_frame(&mut out, &fb, None, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(CLEAR_SCREEN).count(), 1);
        assert_eq!(text.matches(CURSOR_HOME).count(), 2);
    }
}
