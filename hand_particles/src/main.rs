//! hand_particles — interactive entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use hand_particles::app::{run, AppConfig};
use hand_particles::SessionConfig;

#[derive(Parser, Debug)]
#[command(name = "hand_particles", version, about = "Particle swarm that follows your hand")]
struct Args {
    /// TOML session config; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raw bgr24 video (`-` for stdin) instead of the synthetic camera.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Enlarge the canvas by this factor (1.0 to 4.0).
    #[arg(long)]
    zoom: Option<f32>,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// No window: run the pipeline and log statistics.
    #[arg(long)]
    headless: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut session = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None       => SessionConfig::default(),
    };
    if let Some(w) = args.width  { session.width = w; }
    if let Some(h) = args.height { session.height = h; }
    if args.zoom.is_some()       { session.zoom_factor = args.zoom; }

    Ok(AppConfig {
        session:     session.validate()?,
        input:       args.input.clone(),
        frame_limit: args.frames,
        headless:    args.headless,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Hand Particles — gesture-driven particle swarm      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = load_config(&args)?;

    if !cfg.headless {
        println!("  Opening window… move the mouse over it; hold the button for a fist.");
        println!();
    }

    run(cfg).context("hand_particles session failed")
}
