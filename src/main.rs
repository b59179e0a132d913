//! Particle Term entry point
//!
//! Parses the command line, sets up the terminal (or a headless buffer) and
//! runs the simulation loop.

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use particle_term::platform::{ScriptedInput, TerminalInput};
use particle_term::renderer::{BufferSurface, DisplaySurface, TerminalSurface};
use particle_term::sim::Simulation;
use particle_term::{App, RunSummary, Settings};

/// Typed particles attracting and repelling on a toroidal terminal grid.
///
/// Keys: `f` flips every force, `q` quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON settings file (defaults to ./particle-term.json when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of particles
    #[arg(short = 'n', long)]
    particles: Option<usize>,
    /// Number of particle kinds (palette must match)
    #[arg(short, long)]
    types: Option<u8>,
    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Sleep between ticks, in microseconds
    #[arg(short, long)]
    delay_us: Option<u64>,
    /// Per-axis velocity bound
    #[arg(long)]
    max_velocity: Option<f64>,
    /// Run this many ticks without a terminal and print a summary
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
    /// Grid rows for headless runs
    #[arg(long, default_value_t = 24)]
    rows: usize,
    /// Grid columns for headless runs
    #[arg(long, default_value_t = 80)]
    cols: usize,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_config: bool,
    /// Write logs here instead of stderr (terminal runs default to ./particle-term.log when RUST_LOG is set)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Default log file for terminal runs
const LOG_FILE: &str = "particle-term.log";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Nothing is logged
    Off,
}

/// Stderr would draw over the alternate screen, so terminal runs log to a
/// file when logging was asked for and stay silent otherwise.
fn log_target(terminal: bool, log_file: Option<PathBuf>, rust_log_set: bool) -> LogTarget {
    match (log_file, terminal) {
        (Some(path), _) => LogTarget::File(path),
        (None, false) => LogTarget::Stderr,
        (None, true) if rust_log_set => LogTarget::File(PathBuf::from(LOG_FILE)),
        (None, true) => LogTarget::Off,
    }
}

fn init_logger(args: &Args) -> Result<()> {
    let terminal = args.headless.is_none() && !args.dump_config;
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::from_default_env();

    match log_target(terminal, args.log_file.clone(), rust_log_set) {
        LogTarget::Stderr => {}
        LogTarget::File(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogTarget::Off => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load()?,
    };

    if let Some(n) = args.particles {
        settings.sim.n_particles = n;
    }
    if let Some(t) = args.types {
        settings.sim.n_types = t;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(delay) = args.delay_us {
        settings.frame_delay_us = delay;
    }
    if let Some(v) = args.max_velocity {
        settings.sim.max_velocity = v;
    }

    // Same checks for headless and terminal runs
    settings.validate()?;
    Ok(settings)
}

fn run_headless(settings: &Settings, seed: u64, ticks: u64, rows: usize, cols: usize) -> Result<RunSummary> {
    let mut surface = BufferSurface::new(rows, cols)?;
    let sim = Simulation::new(settings.sim.clone(), surface.height(), surface.width(), seed)?;
    let mut app = App::new(sim, Duration::ZERO)
        .with_max_ticks(Some(ticks))
        .with_glyph(settings.glyph);

    let summary = app.run(&mut surface, &mut ScriptedInput::empty())?;
    app.into_simulation().teardown();
    Ok(summary)
}

fn run_terminal(settings: &Settings, seed: u64) -> Result<RunSummary> {
    let palette = settings.palette()?;
    let mut surface = TerminalSurface::new(palette).context("failed to set up terminal")?;
    let sim = Simulation::new(settings.sim.clone(), surface.height(), surface.width(), seed)?;
    let mut app = App::new(sim, settings.frame_delay()).with_glyph(settings.glyph);

    let result = app.run(&mut surface, &mut TerminalInput::new());
    // Restore the terminal before anything is printed
    drop(surface);
    app.into_simulation().teardown();
    Ok(result?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args)?;
    let settings = load_settings(&args)?;

    if args.dump_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let seed = settings.resolve_seed();
    log::info!("Particle Term starting with seed: {}", seed);

    let summary = match args.headless {
        Some(ticks) => run_headless(&settings, seed, ticks, args.rows, args.cols)?,
        None => run_terminal(&settings, seed)?,
    };

    println!(
        "seed {}: {} ticks, {} polarity flips, {} velocity resets",
        seed, summary.ticks, summary.polarity_flips, summary.velocity_resets
    );
    Ok(())
}
