/// Projector - rotating cube in the terminal
///
/// Controls:
///   - W/S or Up/Down: pitch (X axis)
///   - A/D or Left/Right: yaw (Y axis)
///   - E/R: roll (Z axis)
///   - 1/2/3: toggle faces, edges, points
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::{value_parser, Parser};
use log::info;
use projector_core::{RenderConfig, Scene};
use projector_terminal::logging::{init_logging, LoggingConfig};
use projector_terminal::{Controls, TerminalApp};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "projector", version, about = "Depth-sorted rotating cube for the terminal")]
struct Args {
    /// Initial rotation about X, in degrees
    #[arg(long, default_value_t = 0, value_parser = value_parser!(u16).range(0..=360))]
    pitch: u16,

    /// Initial rotation about Y, in degrees
    #[arg(long, default_value_t = 0, value_parser = value_parser!(u16).range(0..=360))]
    yaw: u16,

    /// Initial rotation about Z, in degrees
    #[arg(long, default_value_t = 0, value_parser = value_parser!(u16).range(0..=360))]
    roll: u16,

    /// Degrees per key press
    #[arg(long, default_value_t = 5, value_parser = value_parser!(u16).range(1..=360))]
    step: u16,

    /// Pixels per model unit (default: fit the cube to the terminal)
    #[arg(long, value_parser = parse_scale)]
    scale: Option<f64>,

    /// Draw vertex points only
    #[arg(long)]
    points_only: bool,

    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_scale(s: &str) -> Result<f64, String> {
    let scale: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be a positive number, got {s}"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log_filter.clone(),
        log_file: args.log_file.clone(),
        ..LoggingConfig::default()
    })
    .context("failed to open log file")?;
    info!("starting with {:?}", args);

    let config = if args.points_only {
        RenderConfig::points_only()
    } else {
        RenderConfig::default()
    };
    let controls = Controls::new(args.pitch, args.yaw, args.roll, args.step);

    let mut app = TerminalApp::new(Scene::cube(), controls, config, args.scale)
        .context("failed to query terminal size")?;
    app.run().context("terminal session failed")?;

    Ok(())
}
