use std::path::PathBuf;
use std::process;

use log::error;
use structopt::StructOpt;

use smoothbrot::config::RenderConfig;
use smoothbrot::coord::Viewport;

#[derive(Debug, StructOpt)]
#[structopt(name = "smoothbrot", about = "Render a smooth-colored Mandelbrot set to PNG")]
struct Opt {
    /// Output columns
    #[structopt(long, default_value = "1000")]
    width: usize,

    /// Output rows
    #[structopt(long, default_value = "1000")]
    height: usize,

    #[structopt(long, default_value = "-2.1", allow_hyphen_values = true)]
    x1: f64,

    #[structopt(long, default_value = "0.6", allow_hyphen_values = true)]
    x2: f64,

    #[structopt(long, default_value = "-1.2", allow_hyphen_values = true)]
    y1: f64,

    #[structopt(long, default_value = "1.2", allow_hyphen_values = true)]
    y2: f64,

    /// Escape-time cutoff
    #[structopt(short, long = "iterations", default_value = "1000")]
    iteration_max: u32,

    /// Worker threads, 0 for one per physical CPU
    #[structopt(short, long, default_value = "1")]
    threads: usize,

    #[structopt(short, long, parse(from_os_str), default_value = "render.png")]
    output: PathBuf,
}

impl From<Opt> for RenderConfig {
    fn from(opt: Opt) -> Self {
        Self {
            width: opt.width,
            height: opt.height,
            viewport: Viewport::from_nums(opt.x1, opt.x2, opt.y1, opt.y2),
            iteration_max: opt.iteration_max,
            threads: opt.threads,
            output: opt.output,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: RenderConfig = Opt::from_args().into();
    if let Err(e) = smoothbrot::render_to_file(&config) {
        error!("{}", e);
        process::exit(1);
    }
}
