//! Frame-to-state mapping for the scan sweep.
//!
//! For a buffer of `n` samples and a frame number `f`, every sample index is
//! classified as:
//!
//! - [`Classification::Consumed`]: already emitted (`i < f`)
//! - [`Classification::Current`]: being emitted right now (`i == f`)
//! - [`Classification::Pending`]: not emitted yet (`i > f`)
//!
//! Once `f` reaches `n - 1` the state freezes: any later frame produces the
//! same snapshot as `n - 1`. Running past the end is never an error.

use crate::error::{Error, Result};
use std::fmt;

/// State of one buffer slot at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Already emitted by the device.
    Consumed,
    /// Being emitted this frame.
    Current,
    /// Not emitted yet.
    Pending,
}

impl Classification {
    /// All classifications in sweep order.
    pub const ALL: [Self; 3] = [Self::Consumed, Self::Current, Self::Pending];

    /// Classification of `index` when the sweep is at `current`.
    #[must_use]
    pub fn of(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => Self::Consumed,
            std::cmp::Ordering::Equal => Self::Current,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }
}

/// Per-frame view of the whole buffer handed to renderers.
///
/// Snapshots are plain values: two snapshots compare equal when they describe
/// the same visual state, regardless of how they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    frame: u64,
    current: usize,
    samples_remaining: usize,
    classes: Vec<Classification>,
}

impl RenderSnapshot {
    /// Frame number this snapshot was produced for (may exceed the buffer length).
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Index of the sample currently being emitted.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Samples still waiting after the current one, `max(0, n - 1 - frame)`.
    #[must_use]
    pub const fn samples_remaining(&self) -> usize {
        self.samples_remaining
    }

    /// Number of buffer slots covered.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.classes.len()
    }

    /// Classification of one slot.
    #[must_use]
    pub fn classification(&self, index: usize) -> Option<Classification> {
        self.classes.get(index).copied()
    }

    /// Classification of every slot, in buffer order.
    #[must_use]
    pub fn classifications(&self) -> &[Classification] {
        &self.classes
    }

    /// Number of slots with the given classification.
    #[must_use]
    pub fn count(&self, kind: Classification) -> usize {
        let n = self.classes.len();
        match kind {
            Classification::Consumed => self.current,
            Classification::Current => 1,
            Classification::Pending => n - 1 - self.current,
        }
    }

    /// Indices with the given classification, in buffer order.
    pub fn indices(&self, kind: Classification) -> impl Iterator<Item = usize> + '_ {
        self.classes
            .iter()
            .enumerate()
            .filter(move |&(_, &c)| c == kind)
            .map(|(i, _)| i)
    }

    /// Whether the sweep has reached the last sample.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.current + 1 == self.classes.len()
    }

    /// Human-readable status text for overlays.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "Current sample: {}\nSamples remaining: {}",
            self.current, self.samples_remaining
        )
    }
}

impl fmt::Display for RenderSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {}: sample {}/{} ({} remaining)",
            self.frame,
            self.current,
            self.classes.len(),
            self.samples_remaining
        )
    }
}

/// Index emitted at `frame` for a buffer of `n` samples (`n > 0`).
#[inline]
fn current_for(n: usize, frame: u64) -> usize {
    usize::try_from(frame).map_or(n - 1, |f| f.min(n - 1))
}

/// Classify every slot of an `n`-sample buffer at `frame`.
///
/// Frames at or beyond `n - 1` all return the frozen end state; the returned
/// snapshot still records the requested frame number.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `n` is zero.
///
/// # Example
///
/// ```
/// use scan_viz::scan::{classify, Classification};
///
/// let snap = classify(4, 1).unwrap();
/// assert_eq!(snap.classification(0), Some(Classification::Consumed));
/// assert_eq!(snap.classification(1), Some(Classification::Current));
/// assert_eq!(snap.samples_remaining(), 2);
/// ```
pub fn classify(n: usize, frame: u64) -> Result<RenderSnapshot> {
    if n == 0 {
        return Err(Error::invalid_config(
            "point_count",
            "must be greater than zero",
        ));
    }

    let current = current_for(n, frame);
    let classes = (0..n).map(|i| Classification::of(i, current)).collect();

    Ok(RenderSnapshot {
        frame,
        current,
        samples_remaining: n - 1 - current,
        classes,
    })
}

/// Reusable classification state that updates a snapshot in place.
///
/// Moving forward only rewrites the slots between the old and new current
/// index, so a full sweep costs O(n) in total instead of O(n) per frame.
/// The result is always equal to [`classify`] for the same frame.
#[derive(Debug, Clone)]
pub struct ScanState {
    snapshot: RenderSnapshot,
}

impl ScanState {
    /// Create state for an `n`-sample buffer positioned at frame 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self> {
        Ok(Self {
            snapshot: classify(n, 0)?,
        })
    }

    /// Number of buffer slots.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.snapshot.point_count()
    }

    /// Snapshot for the most recent frame.
    #[must_use]
    pub fn snapshot(&self) -> &RenderSnapshot {
        &self.snapshot
    }

    /// Move to `frame` and return the updated snapshot.
    pub fn advance_to(&mut self, frame: u64) -> &RenderSnapshot {
        let n = self.snapshot.point_count();
        let old = self.snapshot.current;
        let new = current_for(n, frame);

        if new >= old {
            for slot in &mut self.snapshot.classes[old..new] {
                *slot = Classification::Consumed;
            }
        } else {
            // Rewinding: everything after the new position becomes pending again.
            for slot in &mut self.snapshot.classes[new + 1..=old] {
                *slot = Classification::Pending;
            }
        }
        self.snapshot.classes[new] = Classification::Current;

        self.snapshot.frame = frame;
        self.snapshot.current = new;
        self.snapshot.samples_remaining = n - 1 - new;
        &self.snapshot
    }
}
