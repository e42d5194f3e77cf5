//! Timing of the two render phases, escape solving and painting, for the
//! `benches/` targets.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::painter::{PalettePainter, Painter};
use crate::palette::Palette;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PhaseTimings {
    pub solve: Duration,
    pub paint: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.solve + self.paint
    }
}

impl std::ops::Add for PhaseTimings {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            solve: self.solve + other.solve,
            paint: self.paint + other.paint,
        }
    }
}

/// Renders `config` once, in memory, timing each phase.
pub fn time_render(config: &RenderConfig) -> Result<PhaseTimings> {
    let start = Instant::now();
    let solved = crate::solve(config)?;
    let solve = start.elapsed();

    let start = Instant::now();
    PalettePainter::new(Palette::default(), config.iteration_max).paint(&solved)?;
    let paint = start.elapsed();

    Ok(PhaseTimings { solve, paint })
}

pub struct RenderBench {
    config: RenderConfig,
    repeats: u32,
}

impl RenderBench {
    pub fn new(config: RenderConfig, repeats: u32) -> Self {
        Self {
            config,
            repeats: repeats.max(1),
        }
    }

    pub fn label(&self) -> String {
        format!(
            "{}x{} i={} t={}",
            self.config.width,
            self.config.height,
            self.config.iteration_max,
            self.config.worker_threads()
        )
    }

    pub fn run(&self) -> Result<BenchResult> {
        let mut total = PhaseTimings::default();
        for _ in 0..self.repeats {
            total = total + time_render(&self.config)?;
        }
        Ok(BenchResult {
            label: self.label(),
            repeats: self.repeats,
            mean: PhaseTimings {
                solve: total.solve / self.repeats,
                paint: total.paint / self.repeats,
            },
        })
    }
}

#[derive(Clone, Debug)]
pub struct BenchResult {
    pub label: String,
    pub repeats: u32,
    pub mean: PhaseTimings,
}

impl BenchResult {
    pub const CSV_HEADER: &'static str = "render,repeats,solve_ms,paint_ms,total_ms";

    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.label,
            self.repeats,
            self.mean.solve.as_millis(),
            self.mean.paint.as_millis(),
            self.mean.total().as_millis()
        )
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (x{}): solve {}ms, paint {}ms",
            self.label,
            self.repeats,
            self.mean.solve.as_millis(),
            self.mean.paint.as_millis()
        )
    }
}
