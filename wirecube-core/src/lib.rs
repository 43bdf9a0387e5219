//! Wirecube Core Library - Rotating wireframe cube math and render loop
//!
//! This library provides the host-independent part of the renderer: the
//! rotation and projection pipeline, the live settings, the control-panel
//! command language and the tick-driven render loop drawing onto a
//! [`Surface`] supplied by the host.

pub mod command;
pub mod geometry;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod render_loop;
pub mod settings;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use command::{apply_commands, parse_commands, CommandError};
pub use geometry::{Cube, Edge, EDGE_COUNT, VERTEX_COUNT};
pub use math::{Mat3, Point2D, Vec3};
pub use pipeline::Pipeline;
pub use projection::{Camera, ProjectionMode};
pub use render_loop::{
    Clock, FrameScheduler, LoopState, RenderLoop, StopHandle, TickOutcome, TIME_STEP,
};
pub use settings::{Settings, SettingsError, SettingsUpdate};
pub use surface::{Rgb, Stroke, Surface, EDGE_STROKE};
pub use transform::{Axis, RotationAxes, Transform, ROTATION_ORDER};
