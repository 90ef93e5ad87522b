//! # Scan-Viz
//!
//! Animated visualization of a laser-scanning sweep.
//!
//! A scan pattern is a closed Lissajous-style curve sampled at `N` points.
//! An animation walks that sequence one sample per frame; every frame
//! classifies each sample as already emitted, currently emitted or still
//! pending, and hands the result to a renderer.
//!
//! The crate is split into a pure core and its collaborators:
//!
//! - [`curve`]: sample generation for a pattern index
//! - [`scan`]: per-frame classification and status
//! - [`animator`]: the frame-tick driver
//! - [`renderer`]: APNG, SVG and terminal renderers that consume snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use scan_viz::prelude::*;
//!
//! let config = AnimationConfig::new().point_count(64).frame_count(80);
//! let mut animator = Animator::start(config)?;
//! let mut recorder = RecordingRenderer::new();
//! let summary = animator.run(&mut recorder)?;
//!
//! assert_eq!(summary.frames_drawn, 80);
//! assert_eq!(summary.sweep_completed_at, Some(63));
//! # Ok::<(), scan_viz::Error>(())
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Scan curve generation.
pub mod curve;

/// Per-frame sample classification.
pub mod scan;

/// Frame-tick driver.
pub mod animator;

/// Animation and render settings.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Color types.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Layout, styling and rasterization primitives.
pub mod render;

/// Renderers that consume snapshots.
pub mod renderer;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for scan-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use scan_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::{Animator, Pacer, RunSummary};
    pub use crate::color::Rgba;
    pub use crate::config::{AnimationConfig, Config, RenderConfig};
    pub use crate::curve::{generate, PatternCycle, SampleBuffer, SamplePoint};
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::render::ScanStyle;
    pub use crate::renderer::{
        RasterRenderer, RecordingRenderer, Renderer, SvgRenderer, TerminalRenderer,
    };
    pub use crate::scan::{classify, Classification, RenderSnapshot, ScanState};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
