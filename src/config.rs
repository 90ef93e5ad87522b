//! Configuration for the scan animation.
//!
//! Supports YAML configuration with precedence: CLI > file > defaults.
//!
//! ```yaml
//! animation:
//!   point_count: 512
//!   pattern_index: 1
//!   frame_count: 400
//!   tick_period_ms: 1
//! render:
//!   width: 800
//!   height: 800
//!   fps: 30
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Parameters of one animation run.
///
/// Counts are signed so that out-of-range values from a config file or the
/// command line reach [`AnimationConfig::validate`] instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Number of samples in the buffer (`N`).
    #[serde(default = "default_point_count")]
    pub point_count: i64,

    /// Lissajous pattern index (`k`).
    #[serde(default = "default_pattern_index")]
    pub pattern_index: i32,

    /// Total ticks to run; may exceed `point_count`.
    #[serde(default = "default_frame_count")]
    pub frame_count: i64,

    /// Nominal delay between ticks in milliseconds. A scheduling hint only.
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,

    /// Stop ticking once the sweep reaches the last sample instead of padding
    /// the run with frozen frames.
    #[serde(default)]
    pub stop_at_sweep_end: bool,
}

fn default_point_count() -> i64 {
    512
}
fn default_pattern_index() -> i32 {
    1
}
fn default_frame_count() -> i64 {
    400
}
fn default_tick_period_ms() -> u64 {
    1
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            point_count: default_point_count(),
            pattern_index: default_pattern_index(),
            frame_count: default_frame_count(),
            tick_period_ms: default_tick_period_ms(),
            stop_at_sweep_end: false,
        }
    }
}

impl AnimationConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer size.
    #[must_use]
    pub fn point_count(mut self, n: i64) -> Self {
        self.point_count = n;
        self
    }

    /// Set the pattern index.
    #[must_use]
    pub fn pattern_index(mut self, k: i32) -> Self {
        self.pattern_index = k;
        self
    }

    /// Set the number of ticks.
    #[must_use]
    pub fn frame_count(mut self, frames: i64) -> Self {
        self.frame_count = frames;
        self
    }

    /// Set the inter-frame delay hint.
    #[must_use]
    pub fn tick_period(mut self, period: Duration) -> Self {
        self.tick_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Stop at the end of the sweep rather than padding with frozen frames.
    #[must_use]
    pub fn stop_at_sweep_end(mut self, stop: bool) -> Self {
        self.stop_at_sweep_end = stop;
        self
    }

    /// Returns the tick period as a Duration.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Check the configuration and return `(point_count, frame_count)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `point_count <= 0` or
    /// `frame_count < 0`.
    pub fn validate(&self) -> Result<(usize, u64)> {
        let n = usize::try_from(self.point_count)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                Error::invalid_config(
                    "point_count",
                    format!("must be greater than zero, got {}", self.point_count),
                )
            })?;

        let frames = u64::try_from(self.frame_count).map_err(|_| {
            Error::invalid_config(
                "frame_count",
                format!("must not be negative, got {}", self.frame_count),
            )
        })?;

        Ok((n, frames))
    }

    /// Ticks that will actually run once validated.
    ///
    /// With `stop_at_sweep_end` the run is capped at one tick per sample.
    ///
    /// # Errors
    ///
    /// Propagates [`AnimationConfig::validate`] failures.
    pub fn effective_frame_count(&self) -> Result<u64> {
        let (n, frames) = self.validate()?;
        if self.stop_at_sweep_end {
            Ok(frames.min(n as u64))
        } else {
            Ok(frames)
        }
    }
}

/// Output surface settings for the bundled renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Margin around the plot area in pixels.
    #[serde(default = "default_margin")]
    pub margin: u32,

    /// Playback rate of exported animations.
    #[serde(default = "default_fps")]
    pub fps: u16,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    800
}
fn default_margin() -> u32 {
    40
}
fn default_fps() -> u16 {
    30
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            fps: default_fps(),
        }
    }
}

impl RenderConfig {
    /// Check that the plot area is non-empty and the frame rate is positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a surface too small to hold the
    /// margins, or [`Error::InvalidConfiguration`] for a zero frame rate.
    pub fn validate(&self) -> Result<()> {
        let too_small = self
            .margin
            .checked_mul(2)
            .map_or(true, |both| self.width <= both || self.height <= both);
        if too_small {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(Error::invalid_config("fps", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Animation settings.
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Output settings.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Serializes the configuration back to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse {
            line: 0,
            message: e.to_string(),
        })
    }
}
