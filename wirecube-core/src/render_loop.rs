//! The animation driver
//!
//! Each tick runs strictly in this order: check for a stop request, advance
//! the clock, snapshot the settings, project all vertices, clear the surface,
//! draw every edge. Settings changes made between ticks take effect on the
//! next tick only.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace};

use crate::geometry::{Cube, VERTEX_COUNT};
use crate::math::Point2D;
use crate::pipeline::Pipeline;
use crate::settings::{Settings, SettingsError, SettingsUpdate};
use crate::surface::{Surface, EDGE_STROKE};

/// Clock increment per tick. Animation speed follows the tick rate.
pub const TIME_STEP: f64 = 0.01;

/// Accumulated animation time.
///
/// Kept in `f64` so the step stays exact over long runs; rotations only see
/// the time folded into one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    time: f64,
    step: f64,
}

impl Clock {
    pub fn new(step: f64) -> Self {
        Self::starting_at(0.0, step)
    }

    pub fn starting_at(time: f64, step: f64) -> Self {
        Self { time, step }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Rotation angle for the current time, in `[0, 2π)`
    pub fn angle(&self) -> f32 {
        self.time.rem_euclid(TAU) as f32
    }

    pub fn advance(&mut self) -> f64 {
        self.time += self.step;
        self.time
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(TIME_STEP)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stopped,
}

/// Cancellation signal checked at the top of every tick
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Host primitive that waits until the next frame should be drawn
pub trait FrameScheduler {
    /// Returns `false` once the host is going away and no frame will follow.
    fn next_frame(&mut self) -> bool;
}

pub struct RenderLoop<S: Surface> {
    surface: S,
    pipeline: Pipeline,
    settings: Settings,
    clock: Clock,
    state: LoopState,
    stop: StopHandle,
    frames: u64,
}

impl<S: Surface> RenderLoop<S> {
    pub fn new(surface: S, settings: Settings) -> Self {
        Self::with_clock(surface, settings, Clock::default())
    }

    pub fn with_clock(surface: S, settings: Settings, clock: Clock) -> Self {
        Self {
            surface,
            pipeline: Pipeline::new(Cube::unit()),
            settings,
            clock,
            state: LoopState::Initializing,
            stop: StopHandle::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply a control-panel change; it is picked up by the next tick
    pub fn update(&mut self, update: SettingsUpdate) -> Result<(), SettingsError> {
        self.settings.apply(update)
    }

    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cube(&self) -> &Cube {
        self.pipeline.cube()
    }

    pub fn projected(&self) -> &[Point2D; VERTEX_COUNT] {
        self.pipeline.projected()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request a stop; the next tick draws nothing and reports `Stopped`
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state == LoopState::Stopped {
            return TickOutcome::Stopped;
        }
        if self.stop.is_stop_requested() {
            info!("render loop stopped after {} frames", self.frames);
            self.state = LoopState::Stopped;
            return TickOutcome::Stopped;
        }
        if self.state == LoopState::Initializing {
            debug!("render loop running with {:?}", self.settings);
            self.state = LoopState::Running;
        }

        let time = self.clock.advance();
        let snapshot = self.settings;
        let projected = *self.pipeline.run(self.clock.angle(), &snapshot);

        let (width, height) = self.surface.dimensions();
        self.surface.clear(width, height);
        self.surface.translate_origin(width / 2.0, height / 2.0);

        let scale = snapshot.size() * self.surface.pixel_density();
        for edge in self.pipeline.cube().edges() {
            self.surface
                .draw_line(projected[edge.a] * scale, projected[edge.b] * scale, EDGE_STROKE);
        }

        self.frames += 1;
        trace!("frame {} drawn at t={:.2}", self.frames, time);
        TickOutcome::Continue
    }

    /// Tick once per scheduled frame until stopped or the host goes away
    pub fn run<F: FrameScheduler>(&mut self, scheduler: &mut F) -> u64 {
        let start = self.frames;
        while self.tick() == TickOutcome::Continue {
            if !scheduler.next_frame() {
                debug!("frame scheduler ended the loop");
                break;
            }
        }
        self.frames - start
    }
}
