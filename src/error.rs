use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid viewport: x=[{x1}, {x2}], y=[{y1}, {y2}]")]
    InvalidViewport { x1: f64, x2: f64, y1: f64, y2: f64 },

    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: usize, height: usize },

    #[error("iteration_max must be positive")]
    InvalidIterations,

    #[error("could not reassemble worker results")]
    Join,

    #[error("worker thread disconnected")]
    WorkerDisconnected,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(std::io::Error),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
