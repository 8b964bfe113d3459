#![forbid(unsafe_code)]

//! mosaic-demo binary entry point.

use std::fs::File;
use std::sync::Mutex;

use mosaic_demo::app;
use mosaic_demo::cli::Opts;
use mosaic_demo::terminal::TerminalHost;
use mosaic_runtime::EngineResult;
use mosaic_runtime::clock::{ManualClock, SystemClock};
use mosaic_runtime::headless::HeadlessBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    let opts = Opts::parse();
    if let Err(e) = init_logging(&opts) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }
    if let Err(e) = run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to `--log-file` when given. Headless runs fall back to stderr;
/// the terminal host owns the screen, so interactive runs log nowhere else.
fn init_logging(opts: &Opts) -> std::io::Result<()> {
    let filter = EnvFilter::try_new(&opts.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = &opts.log_file {
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else if opts.headless_frames.is_some() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn run(opts: &Opts) -> EngineResult<()> {
    let puzzle = opts.puzzle_config();
    let picture = app::load_picture(&puzzle)?;
    let mut engine = app::build_engine(opts.engine_config(), puzzle, picture)?;

    match opts.headless_frames {
        Some(frames) => {
            let size = engine.config().size;
            let mut backend =
                HeadlessBackend::new(size.width, size.height).with_idle_frames(frames as usize);
            engine.run(&mut backend, &mut ManualClock::new())?;
            info!(presents = backend.presents().len(), "headless run finished");
        }
        None => {
            let mut host = TerminalHost::new()?;
            engine.run(&mut host, &mut SystemClock::new())?;
        }
    }
    Ok(())
}
