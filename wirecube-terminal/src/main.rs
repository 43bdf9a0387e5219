/// Wirecube Terminal - Rotating wireframe cube
/// 
/// Controls:
///   - +/- or Up/Down: Cube size
///   - [/] or Left/Right: Camera distance
///   - X/Y/Z: Toggle rotation around an axis
///   - O: Toggle orthographic projection
///   - ':': Type a command, e.g. `size 250; z off`
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use wirecube_core::settings::{DEFAULT_DISTANCE, DEFAULT_SIZE};
use wirecube_core::{apply_commands, ProjectionMode, RotationAxes, Settings};
use wirecube_terminal::config::{parse_axes, DEFAULT_FPS};
use wirecube_terminal::renderer::DEFAULT_DENSITY;
use wirecube_terminal::{TerminalApp, TerminalConfig};

#[derive(Parser)]
#[command(
    name = "wirecube-terminal",
    version,
    about = "Rotating wireframe cube with perspective and orthographic projection",
    after_help = r#"
Commands (for --set and the ':' prompt):
  size 250        size +10        distance 3.5     dist -0.5
  x off           rotate-y toggle ortho on         projection perspective
  Separate several commands with ';' or ','.

Environment Variables:
  WIRECUBE_LOG_LEVEL=debug     Set log level (error, warn, info, debug, trace)
  RUST_LOG=wirecube_core=trace Fine-grained log filter
"#
)]
struct Cli {
    /// Cube size in logical pixels (20-500)
    #[arg(long, env = "WIRECUBE_SIZE", default_value_t = DEFAULT_SIZE)]
    size: f32,

    /// Camera distance (1-10)
    #[arg(long, env = "WIRECUBE_DISTANCE", default_value_t = DEFAULT_DISTANCE)]
    distance: f32,

    /// Axes to rotate around, e.g. "xyz", "xz" or "none"
    #[arg(long, env = "WIRECUBE_AXES", default_value = "xyz", value_parser = parse_axes)]
    axes: RotationAxes,

    /// Use orthographic instead of perspective projection
    #[arg(long, env = "WIRECUBE_ORTHOGRAPHIC")]
    orthographic: bool,

    /// Target frames per second
    #[arg(long, env = "WIRECUBE_FPS", default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Terminal rows per logical pixel
    #[arg(long, env = "WIRECUBE_DENSITY", default_value_t = DEFAULT_DENSITY)]
    density: f32,

    /// Start with the status line hidden
    #[arg(long)]
    no_hud: bool,

    /// Extra settings commands applied at startup, in order
    #[arg(long = "set", value_name = "COMMANDS")]
    set: Vec<String>,

    /// Set log level
    #[arg(long, value_enum, env = "WIRECUBE_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn build_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::new(cli.size, cli.distance).context("invalid size or distance")?;
    settings.set_rotation(cli.axes);
    if cli.orthographic {
        settings.set_projection(ProjectionMode::Orthographic);
    }
    for commands in &cli.set {
        apply_commands(&mut settings, commands)
            .with_context(|| format!("invalid --set {:?}", commands))?;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr; redirect it (2>wirecube.log) to keep the screen clean
    env_logger::Builder::new()
        .filter_level(cli.log_level.into())
        .parse_default_env()
        .init();

    let settings = build_settings(&cli)?;
    let config = TerminalConfig {
        fps: cli.fps,
        density: cli.density,
        hud: !cli.no_hud,
    };
    info!("starting with {:?} and {:?}", settings, config);

    // Run the terminal app
    let mut app = TerminalApp::new(settings, config).context("failed to query terminal size")?;
    app.run().context("terminal renderer failed")?;

    Ok(())
}
