//! Command-line explorer.
//!
//! Renders the starting view, replays a key script against it and writes the
//! final frame as a PPM image.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use mandelbrot_explorer::{
    FilePresenterPort, MandelbrotConfig, PixelBuffer, PpmFilePresenter, RenderPolicy, Session, SessionOutcome,
    parse_script,
};

#[derive(Parser, Debug)]
#[command(name = "mandelbrot")]
#[command(about = "Parallel Mandelbrot renderer")]
struct Args {
    /// Surface width in pixels
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Number of render workers
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Scheduling policy: static, queue, atomic or work-stealing
    #[arg(short, long, default_value_t = RenderPolicy::TaskQueue)]
    policy: RenderPolicy,

    #[arg(long, default_value_t = 500)]
    max_iterations: u32,

    #[arg(long, default_value_t = -1.5, allow_hyphen_values = true)]
    xmin: f64,

    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    xmax: f64,

    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    ymin: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    ymax: f64,

    /// Key script applied after the first frame, e.g. "ii+rm" or "@320,240"
    #[arg(short, long, default_value = "")]
    commands: String,

    /// Where to write the final frame
    #[arg(short, long, default_value = "output/mandelbrot.ppm")]
    output: PathBuf,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn config(&self) -> MandelbrotConfig {
        MandelbrotConfig {
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: self.ymin,
            ymax: self.ymax,
            max_iterations: self.max_iterations,
            width: self.width,
            height: self.height,
            workers: self.workers,
            policy: self.policy,
            ..MandelbrotConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = args.config();
    let commands = parse_script(&args.commands).context("invalid command script")?;

    let surface = PixelBuffer::new(config.width, config.height)?;
    let mut session = Session::new(&config, surface).context("invalid configuration")?;

    session.start().inspect_err(|err| error!(%err, "initial render failed"))?;

    for command in commands {
        match session.handle(command) {
            Ok(SessionOutcome::Quit) => break,
            Ok(_) => {}
            Err(err) if err.is_fatal() => {
                error!(%err, "render failed");
                bail!(err);
            }
            Err(err) => warn!(%err, ?command, "command ignored"),
        }
    }

    PpmFilePresenter::new()
        .present(session.surface(), &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(path = %args.output.display(), "done");

    Ok(())
}
