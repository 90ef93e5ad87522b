//! Rendering collaborators that consume snapshots.
//!
//! The [`Animator`](crate::animator::Animator) calls [`Renderer::draw`] once
//! per tick, strictly after classification and before the next tick, then the
//! driver calls [`Renderer::export`] once at the end. Renderers only read the
//! snapshots they are handed.

mod raster;
mod svg;
mod terminal;

pub use raster::RasterRenderer;
pub use svg::SvgRenderer;
pub use terminal::TerminalRenderer;

use crate::error::{Error, Result};
use crate::scan::RenderSnapshot;
use std::path::Path;

/// Consumer of per-frame snapshots.
pub trait Renderer {
    /// Draw one frame.
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()>;

    /// Write the finished artifact to `path`.
    fn export(&mut self, path: &Path) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        (**self).draw(snapshot)
    }

    fn export(&mut self, path: &Path) -> Result<()> {
        (**self).export(path)
    }
}

/// Ensure a snapshot was produced for a buffer of `expected` samples.
pub(crate) fn check_point_count(snapshot: &RenderSnapshot, expected: usize) -> Result<()> {
    if snapshot.point_count() == expected {
        Ok(())
    } else {
        Err(Error::invalid_config(
            "point_count",
            format!(
                "snapshot covers {} samples but the buffer holds {expected}",
                snapshot.point_count()
            ),
        ))
    }
}

/// Keeps every snapshot it is handed.
///
/// Useful as a test double and for dumping a textual trace of a run.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    snapshots: Vec<RenderSnapshot>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots in the order they were drawn.
    #[must_use]
    pub fn snapshots(&self) -> &[RenderSnapshot] {
        &self.snapshots
    }

    /// Take ownership of the recorded snapshots.
    #[must_use]
    pub fn into_snapshots(self) -> Vec<RenderSnapshot> {
        self.snapshots
    }

    /// One line per frame, as written by [`Renderer::export`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.snapshots
            .iter()
            .map(|snapshot| format!("{snapshot}\n"))
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn export(&mut self, path: &Path) -> Result<()> {
        if self.snapshots.is_empty() {
            return Err(Error::NothingToExport);
        }
        std::fs::write(path, self.trace())?;
        Ok(())
    }
}
