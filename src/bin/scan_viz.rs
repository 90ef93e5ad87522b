//! scan-viz: watch a laser-scanning sweep walk through its sample buffer.
//!
//! Renders one run to an animated PNG, an SVG of the final frame, or live to
//! the terminal.
//!
//! Run: `scan-viz --points 512 --pattern 3 --format apng --output scan.png`

#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use scan_viz::animator::{Animator, Pacer};
use scan_viz::config::Config;
use scan_viz::curve::{PatternCycle, PATTERN_CYCLE_LEN};
use scan_viz::renderer::{RasterRenderer, Renderer, SvgRenderer, TerminalRenderer};
use std::path::{Path, PathBuf};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Animated PNG of every frame
    Apng,
    /// SVG of the last frame
    Svg,
    /// Live ANSI output; the last frame is saved as ASCII art
    Terminal,
}

impl Format {
    fn default_output(self) -> &'static str {
        match self {
            Self::Apng => "scan.png",
            Self::Svg => "scan.svg",
            Self::Terminal => "scan.txt",
        }
    }
}

/// scan-viz: animated scanning-device sweep
#[derive(Parser, Debug)]
#[command(name = "scan-viz")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Animate a scanning device sweeping through its sample buffer", long_about = None)]
struct Cli {
    /// Config file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of samples in the buffer
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    points: Option<i64>,

    /// Lissajous pattern index
    #[arg(short = 'k', long, allow_negative_numbers = true)]
    pattern: Option<i32>,

    /// Total frames to run (may exceed the number of samples)
    #[arg(short, long, allow_negative_numbers = true)]
    frames: Option<i64>,

    /// Nominal delay between frames in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Stop once the last sample is reached instead of holding the final frame
    #[arg(long)]
    stop_at_end: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Apng)]
    format: Format,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Playback rate of the exported animation
    #[arg(long)]
    fps: Option<u16>,

    /// Run every pattern of the device cycle, one output per pattern
    #[arg(long)]
    cycle: bool,

    /// Pace frames against the wall clock using the tick period
    #[arg(long)]
    realtime: bool,

    /// Terminal columns used by the terminal format
    #[arg(long, default_value = "80")]
    columns: u32,
}

impl Cli {
    /// Load the config file (or defaults) and apply command-line overrides.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => Config::new(),
        };

        let animation = &mut config.animation;
        if let Some(points) = self.points {
            animation.point_count = points;
        }
        if let Some(pattern) = self.pattern {
            animation.pattern_index = pattern;
        }
        if let Some(frames) = self.frames {
            animation.frame_count = frames;
        }
        if let Some(tick_ms) = self.tick_ms {
            animation.tick_period_ms = tick_ms;
        }
        if self.stop_at_end {
            animation.stop_at_sweep_end = true;
        }

        let render = &mut config.render;
        if let Some(width) = self.width {
            render.width = width;
        }
        if let Some(height) = self.height {
            render.height = height;
        }
        if let Some(fps) = self.fps {
            render.fps = fps;
        }

        Ok(config)
    }

    fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_output()))
    }
}

/// `scan.png` becomes `scan_k3.png` for pattern 3.
fn pattern_output(base: &Path, pattern: i32) -> PathBuf {
    let stem = base
        .file_stem()
        .map_or_else(|| "scan".to_string(), |s| s.to_string_lossy().into_owned());
    let name = match base.extension() {
        Some(ext) => format!("{stem}_k{pattern}.{}", ext.to_string_lossy()),
        None => format!("{stem}_k{pattern}"),
    };
    base.with_file_name(name)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let output = cli.output();

    if cli.cycle {
        for pattern in PatternCycle::new().take(PATTERN_CYCLE_LEN as usize) {
            let mut run = config.clone();
            run.animation.pattern_index = pattern;
            render_run(&cli, &run, &pattern_output(&output, pattern))?;
        }
    } else {
        render_run(&cli, &config, &output)?;
    }

    Ok(())
}

fn render_run(cli: &Cli, config: &Config, output: &Path) -> Result<()> {
    let mut animator = Animator::start(config.animation.clone())
        .context("invalid animation configuration")?;
    let buffer = animator.buffer().clone();

    let mut renderer: Box<dyn Renderer> = match cli.format {
        Format::Apng => Box::new(RasterRenderer::new(buffer, &config.render)?),
        Format::Svg => Box::new(SvgRenderer::new(buffer, &config.render)?),
        Format::Terminal => Box::new(TerminalRenderer::new(
            buffer,
            &config.render,
            cli.columns,
            std::io::stdout(),
        )?),
    };

    let mut pacer = if cli.realtime || cli.format == Format::Terminal {
        Pacer::realtime(config.animation.tick_interval())
    } else {
        Pacer::immediate()
    };

    let summary = animator.run_paced(&mut renderer, &mut pacer)?;
    renderer
        .export(output)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        "pattern {}: {} frames in {:.2?} -> {}",
        config.animation.pattern_index,
        summary.frames_drawn,
        summary.elapsed,
        output.display()
    );
    Ok(())
}
