use image::{ImageBuffer, Pixel, RgbImage, Rgba};

use crate::error::{Error, Result};
use crate::palette::Palette;
use crate::solver::EscapeState;

pub trait Painter {
    fn escape_color(&self, value: f64) -> Rgba<u8>;

    /// One color per pixel, row-major.
    fn colors(&self, state: &EscapeState) -> Vec<Rgba<u8>> {
        state.values().map(|v| self.escape_color(v)).collect()
    }

    fn paint(&self, state: &EscapeState) -> Result<RgbImage> {
        let size_error = || Error::InvalidSize {
            width: state.width(),
            height: state.height(),
        };
        let width: u32 = state.width().try_into().map_err(|_| size_error())?;
        let height: u32 = state.height().try_into().map_err(|_| size_error())?;

        let colors = self.colors(state);
        Ok(ImageBuffer::from_fn(width, height, |x, y| {
            colors[y as usize * state.width() + x as usize].to_rgb()
        }))
    }
}

pub struct PalettePainter {
    palette: Palette,
    iteration_max: u32,
}

impl PalettePainter {
    pub fn new(palette: Palette, iteration_max: u32) -> Self {
        Self {
            palette,
            iteration_max,
        }
    }
}

impl Painter for PalettePainter {
    fn escape_color(&self, value: f64) -> Rgba<u8> {
        let index = self.palette.scale(value, self.iteration_max);
        self.palette.color_at(index)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::Viewport;
    use crate::palette::PALETTE;
    use crate::solver::{EscapeSolver, Solver};

    #[test]
    fn test_escape_color_bounds() {
        let painter = PalettePainter::new(Palette::default(), 1000);
        assert_eq!(painter.escape_color(0.0), PALETTE[0]);
        assert_eq!(painter.escape_color(1000.0), PALETTE[81]);
    }

    #[test]
    fn test_paint_matches_colors() {
        let solver = EscapeSolver::new(100);
        let state = solver
            .solve(&EscapeState::initialize(6, 4, &Viewport::default()))
            .unwrap();
        let painter = PalettePainter::new(Palette::default(), 100);
        let colors = painter.colors(&state);
        let img = painter.paint(&state).unwrap();

        assert_eq!(img.dimensions(), (6, 4));
        for (x, y, pixel) in img.enumerate_pixels() {
            let c = colors[y as usize * 6 + x as usize];
            assert_eq!(pixel.0, [c[0], c[1], c[2]]);
        }
    }
}
