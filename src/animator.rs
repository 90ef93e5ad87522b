//! Frame-stepped driver for the scan animation.
//!
//! The [`Animator`] owns the sample buffer and the classification state. Each
//! tick advances the frame by exactly one, recomputes the snapshot and hands
//! it to a [`Renderer`] before moving on. The run ends after the configured
//! number of ticks; nothing loops forever.

use crate::config::AnimationConfig;
use crate::curve::{self, SampleBuffer};
use crate::error::Result;
use crate::renderer::Renderer;
use crate::scan::{self, RenderSnapshot, ScanState};
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Paces ticks against the wall clock.
///
/// The tick period is a hint: late ticks are never dropped or merged, the
/// next deadline is simply pushed out.
#[derive(Debug, Clone)]
pub struct Pacer {
    period: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl Pacer {
    /// Run ticks back to back without sleeping.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            period: None,
            next_deadline: None,
        }
    }

    /// Sleep so that ticks are at least `period` apart.
    #[must_use]
    pub const fn realtime(period: Duration) -> Self {
        Self {
            period: Some(period),
            next_deadline: None,
        }
    }

    /// Block until the next tick is due.
    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };

        let now = Instant::now();
        if let Some(deadline) = self.next_deadline {
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
        self.next_deadline = Some(Instant::now() + period);
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::immediate()
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Snapshots handed to the renderer.
    pub frames_drawn: u64,
    /// Frame at which the sweep reached the last sample, if it did.
    pub sweep_completed_at: Option<u64>,
    /// Ticks spent on the frozen end state after the sweep completed.
    pub frozen_frames: u64,
    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
}

/// Drives the sweep one frame per tick.
///
/// # Example
///
/// ```
/// use scan_viz::animator::Animator;
/// use scan_viz::config::AnimationConfig;
///
/// let config = AnimationConfig::new().point_count(8).frame_count(10);
/// let mut animator = Animator::start(config).unwrap();
///
/// let mut seen = 0;
/// while let Some(snapshot) = animator.tick() {
///     assert!(snapshot.current_index() < 8);
///     seen += 1;
/// }
/// assert_eq!(seen, 10);
/// ```
#[derive(Debug, Clone)]
pub struct Animator {
    config: AnimationConfig,
    buffer: SampleBuffer,
    state: ScanState,
    total_frames: u64,
    frame: u64,
}

impl Animator {
    /// Validate `config`, generate the buffer and position the sweep before frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `point_count <= 0`
    /// or `frame_count < 0`.
    pub fn start(config: AnimationConfig) -> Result<Self> {
        let (n, _) = config.validate()?;
        let total_frames = config.effective_frame_count()?;
        let buffer = curve::generate(n, config.pattern_index)?;
        let state = ScanState::new(n)?;

        debug!(
            "animator started: {} points, pattern {}, {} frames",
            n, config.pattern_index, total_frames
        );

        Ok(Self {
            config,
            buffer,
            state,
            total_frames,
            frame: 0,
        })
    }

    /// Configuration the animator was started with.
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// The sample buffer being swept.
    #[must_use]
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Number of ticks this run will produce.
    #[must_use]
    pub const fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frame number the next tick will produce.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Ticks left before the run stops.
    #[must_use]
    pub const fn remaining_ticks(&self) -> u64 {
        self.total_frames.saturating_sub(self.frame)
    }

    /// Whether every tick has been produced.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.frame >= self.total_frames
    }

    /// Rewind to frame 0, keeping the buffer.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.state.advance_to(0);
    }

    /// Advance one frame and return its snapshot, or `None` once the run is over.
    pub fn tick(&mut self) -> Option<&RenderSnapshot> {
        if self.is_finished() {
            return None;
        }

        let frame = self.frame;
        self.frame += 1;
        let snapshot = self.state.advance_to(frame);
        trace!("tick {frame}: current sample {}", snapshot.current_index());
        Some(snapshot)
    }

    /// Lazy sequence of every snapshot of this run, starting at frame 0.
    ///
    /// Independent of [`Animator::tick`]; each call starts over.
    #[must_use]
    pub fn frames(&self) -> Frames {
        Frames {
            point_count: self.state.point_count(),
            next: 0,
            end: self.total_frames,
        }
    }

    /// Feed every remaining tick to `renderer` as fast as possible.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first renderer error.
    pub fn run<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<RunSummary> {
        self.run_paced(renderer, &mut Pacer::immediate())
    }

    /// Feed every remaining tick to `renderer`, waiting on `pacer` between ticks.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first renderer error.
    pub fn run_paced<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        pacer: &mut Pacer,
    ) -> Result<RunSummary> {
        let started = Instant::now();
        let mut frames_drawn = 0;
        let mut sweep_completed_at = None;
        let mut frozen_frames = 0;

        while !self.is_finished() {
            pacer.wait();
            let frame = self.frame;
            let Some(snapshot) = self.tick() else {
                break;
            };

            if snapshot.is_frozen() {
                if sweep_completed_at.is_none() {
                    sweep_completed_at = Some(frame);
                } else {
                    frozen_frames += 1;
                }
            }

            renderer.draw(snapshot)?;
            frames_drawn += 1;
        }

        let summary = RunSummary {
            frames_drawn,
            sweep_completed_at,
            frozen_frames,
            elapsed: started.elapsed(),
        };
        debug!("animator finished: {summary:?}");
        Ok(summary)
    }
}

/// Finite, restartable iterator of snapshots produced by [`Animator::frames`].
#[derive(Debug, Clone)]
pub struct Frames {
    point_count: usize,
    next: u64,
    end: u64,
}

impl Iterator for Frames {
    type Item = RenderSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.next;
        self.next += 1;
        // point_count was validated when the animator started.
        scan::classify(self.point_count, frame).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames {}
