/// Example: Render a few frames off-screen and print the last one
/// 
/// Usage: cargo run --example snapshot -- [frames] [commands]
/// e.g.   cargo run --example snapshot -- 120 "ortho on; size 200"

use anyhow::{Context, Result};
use std::env;
use wirecube_core::{apply_commands, FrameScheduler, RenderLoop, Settings};
use wirecube_terminal::renderer::{TerminalSurface, DEFAULT_DENSITY};

/// Schedules a fixed number of frames without waiting
struct FixedFrames(u32);

impl FrameScheduler for FixedFrames {
    fn next_frame(&mut self) -> bool {
        self.0 = self.0.saturating_sub(1);
        self.0 > 0
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let frames: u32 = match args.get(1) {
        Some(n) => n.parse().with_context(|| format!("invalid frame count {:?}", n))?,
        None => 60,
    };

    let mut settings = Settings::default();
    if let Some(commands) = args.get(2) {
        apply_commands(&mut settings, commands)?;
    }

    let surface = TerminalSurface::new(80, 24, DEFAULT_DENSITY);
    let mut render_loop = RenderLoop::new(surface, settings);
    let drawn = render_loop.run(&mut FixedFrames(frames.max(1)));

    print!("{}", render_loop.surface().to_text());
    println!(
        "{} frames, t = {:.2}, {:?}",
        drawn,
        render_loop.clock().time(),
        render_loop.settings()
    );
    Ok(())
}
