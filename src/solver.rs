use std::f64::consts::LN_2;

use crate::complex::*;
use crate::coord::Viewport;
use crate::error::{Error, Result};
use crate::threads::{Split, ThreadedSolver};

pub trait Solver<T> {
    fn solve(&self, state: &T) -> Result<T>;
}

#[derive(Clone, Debug)]
pub struct EscapeCell {
    pub(crate) c: C<f64>,
    pub(crate) value: f64,
}

/// Grid of escape values, stored row-major (`y * width + x`).
#[derive(Clone, Debug)]
pub struct EscapeState {
    width: usize,
    height: usize,
    cells: Vec<EscapeCell>,
}

impl EscapeState {
    pub fn initialize(width: usize, height: usize, viewport: &Viewport<f64>) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(EscapeCell {
                    c: viewport.pixel_to_complex(x, y, width, height),
                    value: 0.0,
                });
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.cells[y * self.width + x].value
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().map(|cell| cell.value)
    }
}

/// Splits into bands of whole rows, top to bottom.
impl Split for EscapeState {
    fn split_parts(&self, n: usize) -> Vec<Self> {
        let row = |i: usize| i * self.height / n;
        (0..n)
            .map(|i| {
                let (top, bottom) = (row(i), row(i + 1));
                Self {
                    width: self.width,
                    height: bottom - top,
                    cells: self.cells[top * self.width..bottom * self.width].to_vec(),
                }
            })
            .collect()
    }

    fn join_parts(parts: Vec<Self>) -> Self {
        let width = parts.first().map_or(0, |part| part.width);
        let mut height = 0;
        let mut cells = Vec::new();
        for part in parts {
            assert_eq!(part.width, width, "bands of different widths");
            height += part.height;
            cells.extend(part.cells);
        }
        Self {
            width,
            height,
            cells,
        }
    }
}

/// Smoothed escape-time iteration of `z -> z^2 + c` from `z = 0`.
#[derive(Clone, Debug)]
pub struct EscapeSolver {
    iteration_max: u32,
    escape_radius_sq: f64,
}

impl EscapeSolver {
    pub fn new(iteration_max: u32) -> Self {
        Self {
            iteration_max,
            ..Self::default()
        }
    }

    /// Number of iterations before the orbit of `c` leaves the escape
    /// radius, together with the final orbit point.
    pub fn iterate(&self, c: C<f64>) -> (u32, C<f64>) {
        let mut z = ORIGIN;
        let mut i = 0;
        while z.norm_sqr() <= self.escape_radius_sq && i < self.iteration_max {
            z = z * z + c;
            i += 1;
        }
        (i, z)
    }

    /// Continuous escape value of `c`, in `[0, iteration_max]`. Points that
    /// never escape get exactly `iteration_max`.
    pub fn escape_value(&self, c: C<f64>) -> f64 {
        let max = self.iteration_max as f64;
        let (i, z) = self.iterate(c);
        if i >= self.iteration_max {
            return max;
        }
        let log_zn = z.norm_sqr().ln() / 2.0;
        let nu = (log_zn / LN_2).ln() / LN_2;
        let smoothed = i as f64 + 1.0 - nu;
        // Far-out points can overshoot below zero, and overflowing orbits
        // give NaN. Both count as escaping immediately.
        if smoothed.is_nan() {
            0.0
        } else {
            smoothed.clamp(0.0, max)
        }
    }
}

impl Default for EscapeSolver {
    fn default() -> Self {
        Self {
            iteration_max: 1000,
            escape_radius_sq: (1 << 16) as f64,
        }
    }
}

impl Solver<EscapeState> for EscapeSolver {
    fn solve(&self, state: &EscapeState) -> Result<EscapeState> {
        let mut state = state.clone();
        for x in 0..state.width {
            for y in 0..state.height {
                let cell = &mut state.cells[y * state.width + x];
                cell.value = self.escape_value(cell.c);
            }
        }
        Ok(state)
    }
}

/// Plain solver for `threads <= 1`, otherwise a worker pool of that size.
pub fn make_solver(
    solver: EscapeSolver,
    threads: usize,
) -> Result<Box<dyn Solver<EscapeState> + Send>> {
    if solver.iteration_max == 0 {
        return Err(Error::InvalidIterations);
    }
    if threads <= 1 {
        Ok(Box::new(solver))
    } else {
        Ok(Box::new(ThreadedSolver::spawn(threads, &solver)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_origin_never_escapes() {
        let solver = EscapeSolver::default();
        let (i, _) = solver.iterate(ORIGIN);
        assert_eq!(i, 1000);
        assert_eq!(solver.escape_value(ORIGIN), 1000.0);
    }

    #[test]
    fn test_far_point_escapes_fast() {
        let solver = EscapeSolver::default();
        let (i, z) = solver.iterate(c(2.0, 2.0));
        assert_eq!(i, 4);
        assert!(z.norm_sqr() > 65536.0);
        let v = solver.escape_value(c(2.0, 2.0));
        assert!(v > 0.0 && v < 5.0, "{}", v);
    }

    #[test]
    fn test_smoothing_formula() {
        let solver = EscapeSolver::default();
        let point = c(0.5, 0.5);
        let (i, z) = solver.iterate(point);
        assert!(i < 1000);
        let log_zn = (z.re * z.re + z.im * z.im).ln() / 2.0;
        let nu = (log_zn / LN_2).ln() / LN_2;
        assert_eq!(solver.escape_value(point), i as f64 + 1.0 - nu);
    }

    #[test]
    fn test_huge_point_clamped() {
        let solver = EscapeSolver::default();
        assert_eq!(solver.escape_value(c(1e10, 1e10)), 0.0);
        assert_eq!(solver.escape_value(c(1e300, 1e300)), 0.0);
    }

    #[test]
    fn test_values_in_range() {
        let solver = EscapeSolver::new(50);
        let initial = EscapeState::initialize(40, 30, &Viewport::default());
        let solved = solver.solve(&initial).unwrap();
        assert_eq!(solved.values().count(), 1200);
        assert!(solved.values().all(|v| (0.0..=50.0).contains(&v)));
    }

    #[test]
    fn test_deterministic() {
        let solver = EscapeSolver::new(200);
        let initial = EscapeState::initialize(25, 25, &Viewport::default());
        let bits = |state: EscapeState| state.values().map(f64::to_bits).collect::<Vec<u64>>();
        let a = bits(solver.solve(&initial).unwrap());
        let b = bits(solver.solve(&initial).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_major_layout() {
        let viewport = Viewport::default();
        let solver = EscapeSolver::new(100);
        let solved = solver
            .solve(&EscapeState::initialize(7, 5, &viewport))
            .unwrap();
        for y in 0..5 {
            for x in 0..7 {
                let expected = solver.escape_value(viewport.pixel_to_complex(x, y, 7, 5));
                assert_eq!(solved.value(x, y), expected);
            }
        }
    }

    #[test]
    fn test_threaded_matches_single() {
        let initial = EscapeState::initialize(31, 17, &Viewport::default());
        let single = make_solver(EscapeSolver::new(300), 1).unwrap();
        let threaded = make_solver(EscapeSolver::new(300), 4).unwrap();
        let a = single.solve(&initial).unwrap();
        let b = threaded.solve(&initial).unwrap();
        assert_eq!(b.height(), 17);
        assert_eq!(b.width(), 31);
        assert!(a.values().zip(b.values()).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    #[test]
    fn test_more_threads_than_rows() {
        let initial = EscapeState::initialize(4, 2, &Viewport::default());
        let threaded = make_solver(EscapeSolver::new(20), 8).unwrap();
        let solved = threaded.solve(&initial).unwrap();
        assert_eq!(solved.height(), 2);
        assert_eq!(solved.values().count(), 8);
    }

    #[test]
    fn test_row_bands() {
        let state = EscapeState::initialize(3, 5, &Viewport::default());
        let bands = state.split_parts(2);
        let heights: Vec<usize> = bands.iter().map(EscapeState::height).collect();
        assert_eq!(heights, vec![2, 3]);
        assert!(bands.iter().all(|b| b.cells.len() == b.width * b.height));

        let joined = EscapeState::join_parts(bands);
        assert_eq!(joined.height(), 5);
        let original: Vec<_> = state.cells.iter().map(|cell| cell.c).collect();
        let rebuilt: Vec<_> = joined.cells.iter().map(|cell| cell.c).collect();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(make_solver(EscapeSolver::new(0), 1).is_err());
    }
}
