//! Terminal host configuration
//!
//! Settings come from command-line flags, then `WIRECUBE_*` environment
//! variables, then the core defaults.

use std::time::Duration;

use wirecube_core::{Axis, RotationAxes};

use crate::renderer::DEFAULT_DENSITY;

pub const DEFAULT_FPS: u32 = 60;

/// Size step for the `+`/`-` keys
pub const SIZE_STEP: f32 = 10.0;

/// Distance step for the `[`/`]` keys
pub const DISTANCE_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalConfig {
    /// Target frames per second
    pub fps: u32,
    /// Terminal rows per logical pixel
    pub density: f32,
    /// Show the status line
    pub hud: bool,
}

impl TerminalConfig {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            density: DEFAULT_DENSITY,
            hud: true,
        }
    }
}

/// Parse an axis list such as `xyz`, `xz` or `none`
pub fn parse_axes(input: &str) -> Result<RotationAxes, String> {
    let mut axes = RotationAxes::none();
    if input.eq_ignore_ascii_case("none") {
        return Ok(axes);
    }
    for c in input.chars() {
        let axis = match c.to_ascii_lowercase() {
            'x' => Axis::X,
            'y' => Axis::Y,
            'z' => Axis::Z,
            ',' | ' ' => continue,
            other => return Err(format!("unknown rotation axis '{}'", other)),
        };
        axes.set(axis, true);
    }
    Ok(axes)
}

/// Inverse of [`parse_axes`], used by the status line
pub fn format_axes(axes: RotationAxes) -> String {
    let names: String = Axis::ALL
        .iter()
        .filter(|axis| axes.is_enabled(**axis))
        .map(|axis| axis.name())
        .collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_axes() {
        assert_eq!(parse_axes("xyz").unwrap(), RotationAxes::all());
        assert_eq!(parse_axes("NONE").unwrap(), RotationAxes::none());
        assert_eq!(parse_axes("").unwrap(), RotationAxes::none());
        assert_eq!(
            parse_axes("z, X").unwrap(),
            RotationAxes {
                x: true,
                y: false,
                z: true
            }
        );
        assert!(parse_axes("xw").is_err());
    }

    #[test]
    fn test_format_axes_round_trips() {
        for text in ["xyz", "xz", "y", "none"] {
            assert_eq!(format_axes(parse_axes(text).unwrap()), text);
        }
    }

    #[test]
    fn test_frame_time() {
        let config = TerminalConfig {
            fps: 50,
            ..TerminalConfig::default()
        };
        assert_eq!(config.frame_time(), Duration::from_millis(20));

        let zero = TerminalConfig {
            fps: 0,
            ..TerminalConfig::default()
        };
        assert_eq!(zero.frame_time(), Duration::from_secs(1));
    }
}
