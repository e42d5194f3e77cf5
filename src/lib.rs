use std::time::Instant;

use image::{RgbImage, Rgba};
use log::{debug, info};

use crate::config::RenderConfig;
use crate::coord::Viewport;
use crate::painter::{PalettePainter, Painter};
use crate::palette::Palette;
use crate::solver::{make_solver, EscapeSolver, EscapeState, Solver};

pub mod bench;
pub mod complex;
pub mod config;
pub mod coord;
pub mod error;
pub mod painter;
pub mod palette;
pub mod solver;
pub mod threads;

pub use error::{Error, Result};

/// Computes the escape value of every pixel described by `config`.
pub fn solve(config: &RenderConfig) -> Result<EscapeState> {
    config.validate()?;
    let threads = config.worker_threads();
    info!(
        "rendering {}x{} over x=[{}, {}] y=[{}, {}], {} iterations, {} thread(s)",
        config.width,
        config.height,
        config.viewport.x.min,
        config.viewport.x.max,
        config.viewport.y.min,
        config.viewport.y.max,
        config.iteration_max,
        threads,
    );

    let start = Instant::now();
    let solver = make_solver(EscapeSolver::new(config.iteration_max), threads)?;
    let initial = EscapeState::initialize(config.width, config.height, &config.viewport);
    let solved = solver.solve(&initial)?;
    debug!("solved in {}ms", start.elapsed().as_millis());
    Ok(solved)
}

/// Colors of a `width` x `height` render, row-major.
pub fn mandelbrot(
    width: usize,
    height: usize,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    iteration_max: u32,
) -> Result<Vec<Rgba<u8>>> {
    let config = RenderConfig {
        width,
        height,
        viewport: Viewport::from_nums(x1, x2, y1, y2),
        iteration_max,
        ..RenderConfig::default()
    };
    let solved = solve(&config)?;
    let painter = PalettePainter::new(Palette::default(), iteration_max);
    Ok(painter.colors(&solved))
}

pub fn render(config: &RenderConfig) -> Result<RgbImage> {
    let solved = solve(config)?;
    let start = Instant::now();
    let painter = PalettePainter::new(Palette::default(), config.iteration_max);
    let img = painter.paint(&solved)?;
    debug!("painted in {}ms", start.elapsed().as_millis());
    Ok(img)
}

pub fn render_to_file(config: &RenderConfig) -> Result<()> {
    let img = render(config)?;
    img.save(&config.output)?;
    info!("wrote {}", config.output.display());
    Ok(())
}
