//! Live terminal renderer.

use super::{RasterRenderer, Renderer};
use crate::config::RenderConfig;
use crate::curve::SampleBuffer;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{TerminalEncoder, TerminalMode};
use crate::scan::RenderSnapshot;
use std::io::Write;
use std::path::Path;

/// Prints every frame to a terminal as it is drawn.
///
/// Rasterization is delegated to a [`RasterRenderer`]; `export` writes the
/// final frame as plain ASCII art.
pub struct TerminalRenderer<W: Write> {
    raster: RasterRenderer,
    encoder: TerminalEncoder,
    out: W,
    last: Option<(Framebuffer, String)>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Create a renderer writing to `out`, redrawing frames in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the raster surface is invalid.
    pub fn new(buffer: SampleBuffer, render: &RenderConfig, columns: u32, out: W) -> Result<Self> {
        Ok(Self {
            raster: RasterRenderer::new(buffer, render)?,
            encoder: TerminalEncoder::new().width(columns).animate(true),
            out,
            last: None,
        })
    }

    /// Use a different encoder configuration.
    #[must_use]
    pub fn encoder(mut self, encoder: TerminalEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Recover the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        let fb = self.raster.render_frame(snapshot)?;
        let caption = snapshot.status_line();
        let first = self.last.is_none();
        self.encoder
            .write_frame(&mut self.out, &fb, Some(&caption), first)?;
        self.last = Some((fb, caption));
        Ok(())
    }

    fn export(&mut self, path: &Path) -> Result<()> {
        let (fb, caption) = self.last.as_ref().ok_or(Error::NothingToExport)?;
        let text = self
            .encoder
            .clone()
            .mode(TerminalMode::Ascii)
            .animate(false)
            .render(fb, Some(caption));
        std::fs::write(path, text)?;
        Ok(())
    }
}
