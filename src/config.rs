use std::path::PathBuf;

use crate::coord::Viewport;
use crate::error::{Error, Result};

pub const DEFAULT_OUTPUT: &str = "render.png";

#[derive(Clone, Debug)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub viewport: Viewport<f64>,
    pub iteration_max: u32,
    /// Worker threads. `1` renders on the calling thread, `0` uses one
    /// worker per physical CPU. Never more workers than rows are started.
    pub threads: usize,
    pub output: PathBuf,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        let fits_u32 = |n: usize| u32::try_from(n).is_ok();
        if self.width == 0 || self.height == 0 || !fits_u32(self.width) || !fits_u32(self.height)
        {
            return Err(Error::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.iteration_max == 0 {
            return Err(Error::InvalidIterations);
        }
        self.viewport.validate()
    }

    pub fn worker_threads(&self) -> usize {
        let requested = match self.threads {
            0 => num_cpus::get_physical(),
            n => n,
        };
        requested.min(self.height).max(1)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            viewport: Viewport::default(),
            iteration_max: 1000,
            threads: 1,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (1000, 1000));
        assert_eq!(config.output, PathBuf::from("render.png"));
        assert_eq!(config.worker_threads(), 1);
    }

    #[test]
    fn test_worker_threads_capped_by_rows() {
        let config = RenderConfig {
            height: 3,
            threads: usize::MAX,
            ..RenderConfig::default()
        };
        assert_eq!(config.worker_threads(), 3);

        let auto = RenderConfig {
            height: 1,
            threads: 0,
            ..RenderConfig::default()
        };
        assert_eq!(auto.worker_threads(), 1);
    }

    #[test]
    fn test_rejects_bad_config() {
        let empty = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(empty.validate(), Err(Error::InvalidSize { .. })));

        let no_iterations = RenderConfig {
            iteration_max: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            no_iterations.validate(),
            Err(Error::InvalidIterations)
        ));

        let flipped = RenderConfig {
            viewport: Viewport::from_nums(0.6, -2.1, -1.2, 1.2),
            ..RenderConfig::default()
        };
        assert!(matches!(
            flipped.validate(),
            Err(Error::InvalidViewport { .. })
        ));
    }
}
