//! Live-tunable render parameters
//!
//! The render loop owns a [`Settings`] value and copies it once at the start
//! of every tick. Control panels change it only through [`SettingsUpdate`],
//! which keeps the numeric fields inside their configured ranges.

use std::ops::RangeInclusive;

use log::debug;
use thiserror::Error;

use crate::projection::{Camera, ProjectionMode};
use crate::transform::{Axis, RotationAxes};

/// Allowed cube size, in logical pixels per model unit
pub const SIZE_RANGE: RangeInclusive<f32> = 20.0..=500.0;
pub const DEFAULT_SIZE: f32 = 100.0;

/// Allowed camera distance, in model units
pub const DISTANCE_RANGE: RangeInclusive<f32> = 1.0..=10.0;
pub const DEFAULT_DISTANCE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}

/// A single change requested by a control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsUpdate {
    Size(f32),
    NudgeSize(f32),
    Distance(f32),
    NudgeDistance(f32),
    Rotate(Axis, bool),
    ToggleRotation(Axis),
    Projection(ProjectionMode),
    ToggleProjection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    size: f32,
    distance: f32,
    rotation: RotationAxes,
    projection: ProjectionMode,
}

impl Settings {
    pub fn new(size: f32, distance: f32) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        settings.set_size(size)?;
        settings.set_distance(distance)?;
        Ok(settings)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn rotation(&self) -> RotationAxes {
        self.rotation
    }

    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.distance, self.projection)
    }

    /// Set the cube size, clamped to [`SIZE_RANGE`]. Returns the stored value.
    pub fn set_size(&mut self, size: f32) -> Result<f32, SettingsError> {
        self.size = clamp_finite("size", size, &SIZE_RANGE)?;
        Ok(self.size)
    }

    /// Set the camera distance, clamped to [`DISTANCE_RANGE`]. Returns the stored value.
    pub fn set_distance(&mut self, distance: f32) -> Result<f32, SettingsError> {
        self.distance = clamp_finite("distance", distance, &DISTANCE_RANGE)?;
        Ok(self.distance)
    }

    pub fn set_rotation(&mut self, rotation: RotationAxes) {
        self.rotation = rotation;
    }

    pub fn set_projection(&mut self, projection: ProjectionMode) {
        self.projection = projection;
    }

    pub fn apply(&mut self, update: SettingsUpdate) -> Result<(), SettingsError> {
        match update {
            SettingsUpdate::Size(size) => {
                self.set_size(size)?;
            }
            SettingsUpdate::NudgeSize(delta) => {
                self.set_size(self.size + delta)?;
            }
            SettingsUpdate::Distance(distance) => {
                self.set_distance(distance)?;
            }
            SettingsUpdate::NudgeDistance(delta) => {
                self.set_distance(self.distance + delta)?;
            }
            SettingsUpdate::Rotate(axis, enabled) => self.rotation.set(axis, enabled),
            SettingsUpdate::ToggleRotation(axis) => self.rotation.toggle(axis),
            SettingsUpdate::Projection(mode) => self.projection = mode,
            SettingsUpdate::ToggleProjection => self.projection = self.projection.toggled(),
        }
        debug!("settings updated by {:?}: {:?}", update, self);
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            distance: DEFAULT_DISTANCE,
            rotation: RotationAxes::all(),
            projection: ProjectionMode::Perspective,
        }
    }
}

fn clamp_finite(
    field: &'static str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> Result<f32, SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError::NonFinite { field, value });
    }
    Ok(value.clamp(*range.start(), *range.end()))
}
