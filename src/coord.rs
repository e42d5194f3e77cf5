use num::Num;

use crate::complex::*;
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Axis<T> {
    pub min: T,
    pub max: T,
}

impl<T> Axis<T>
where
    T: Num + Copy,
{
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl Axis<f64> {
    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min
    }

    /// Pixels per unit of the complex plane along this axis.
    pub fn zoom(&self, pixels: usize) -> f64 {
        pixels as f64 / self.length()
    }
}

/// Rectangle of the complex plane mapped onto the output image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport<T> {
    pub x: Axis<T>,
    pub y: Axis<T>,
}

impl<T> Viewport<T>
where
    T: Num + Copy,
{
    pub fn new(x: Axis<T>, y: Axis<T>) -> Self {
        Self { x, y }
    }

    pub fn from_nums(x1: T, x2: T, y1: T, y2: T) -> Self {
        Self::new(Axis::new(x1, x2), Axis::new(y1, y2))
    }
}

impl Viewport<f64> {
    /// Rejects viewports whose axes are reversed, empty or non-finite. Such
    /// viewports would give non-finite zoom factors.
    pub fn validate(&self) -> Result<()> {
        if self.x.is_ordered() && self.y.is_ordered() {
            Ok(())
        } else {
            Err(Error::InvalidViewport {
                x1: self.x.min,
                x2: self.x.max,
                y1: self.y.min,
                y2: self.y.max,
            })
        }
    }

    pub fn zoom(&self, width: usize, height: usize) -> (f64, f64) {
        (self.x.zoom(width), self.y.zoom(height))
    }

    /// Maps pixel `(px, py)` of a `width` x `height` image to its point on
    /// the complex plane. Pixel `(0, 0)` lands exactly on `(x.min, y.min)`.
    pub fn pixel_to_complex(&self, px: usize, py: usize, width: usize, height: usize) -> C<f64> {
        let (zoom_x, zoom_y) = self.zoom(width, height);
        c(
            px as f64 / zoom_x + self.x.min,
            py as f64 / zoom_y + self.y.min,
        )
    }
}

impl Default for Viewport<f64> {
    fn default() -> Self {
        Self::from_nums(-2.1, 0.6, -1.2, 1.2)
    }
}
