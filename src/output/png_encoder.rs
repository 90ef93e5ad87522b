//! PNG and animated PNG output encoder.
//!
//! Pure Rust encoding using the `png` crate. Animations are written as APNG,
//! which every current browser plays back and which degrades to its first
//! frame in viewers without APNG support.

use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::encode_still(fb, BufWriter::new(file))
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode_still(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn encode_still<W: Write>(fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        // Use compact pixels to handle stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }
}

/// Streaming animated PNG encoder.
///
/// Frames are encoded as they arrive, so memory use stays at one frame no
/// matter how long the animation runs.
pub struct ApngEncoder {
    width: u32,
    height: u32,
    fps: u16,
    plays: u32,
}

impl ApngEncoder {
    /// Create an encoder for `width`x`height` frames played at `fps`.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions.
    pub fn new(width: u32, height: u32, fps: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            fps: fps.max(1),
            plays: 0,
        })
    }

    /// Number of times the animation plays; 0 loops forever (the default).
    #[must_use]
    pub fn plays(mut self, plays: u32) -> Self {
        self.plays = plays;
        self
    }

    /// Encode `frame_count` frames pulled from `frames` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToExport`] for an empty animation, an
    /// [`Error::InvalidDimensions`] if a frame does not match the encoder size,
    /// or the first frame-production or encoding error.
    pub fn encode<W, I>(&self, sink: W, frame_count: u32, frames: I) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = Result<Framebuffer>>,
    {
        if frame_count == 0 {
            return Err(Error::NothingToExport);
        }

        let mut encoder = png::Encoder::new(sink, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_animated(frame_count, self.plays)?;
        encoder.set_frame_delay(1, self.fps)?;

        let mut writer = encoder.write_header()?;
        for frame in frames.into_iter().take(frame_count as usize) {
            let fb = frame?;
            if fb.width() != self.width || fb.height() != self.height {
                return Err(Error::InvalidDimensions {
                    width: fb.width(),
                    height: fb.height(),
                });
            }
            writer.write_image_data(&fb.to_compact_pixels())?;
        }
        writer.finish()?;
        Ok(())
    }

    /// Encode frames into an APNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or encoding fails.
    pub fn write_to_file<P, I>(&self, path: P, frame_count: u32, frames: I) -> Result<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = Result<Framebuffer>>,
    {
        let file = File::create(path)?;
        self.encode(BufWriter::new(file), frame_count, frames)
    }

    /// Encode frames into APNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes<I>(&self, frame_count: u32, frames: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = Result<Framebuffer>>,
    {
        let mut buffer = Vec::new();
        self.encode(&mut buffer, frame_count, frames)?;
        Ok(buffer)
    }
}
