/// Time-driven rotation matrices and per-axis rotation toggles
use crate::math::{mul_mat3_vec3, Mat3, Vec3};

/// A rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Order in which enabled rotations are applied to each vertex.
///
/// Rotations do not commute; changing this changes every rendered frame.
pub const ROTATION_ORDER: [Axis; 3] = [Axis::Z, Axis::X, Axis::Y];

/// Which axes the cube spins around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl RotationAxes {
    pub fn all() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }

    pub fn none() -> Self {
        Self {
            x: false,
            y: false,
            z: false,
        }
    }

    pub fn is_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, enabled: bool) {
        match axis {
            Axis::X => self.x = enabled,
            Axis::Y => self.y = enabled,
            Axis::Z => self.z = enabled,
        }
    }

    pub fn toggle(&mut self, axis: Axis) {
        self.set(axis, !self.is_enabled(axis));
    }
}

impl Default for RotationAxes {
    fn default() -> Self {
        Self::all()
    }
}

/// Rotation matrix builder
pub struct Transform;

impl Transform {
    /// Right-handed rotation about X by `t` radians
    pub fn rotation_x(t: f32) -> Mat3 {
        let (s, c) = t.sin_cos();
        Mat3::new(
            1.0, 0.0, 0.0, //
            0.0, c, -s, //
            0.0, s, c,
        )
    }

    /// Right-handed rotation about Y by `t` radians
    pub fn rotation_y(t: f32) -> Mat3 {
        let (s, c) = t.sin_cos();
        Mat3::new(
            c, 0.0, s, //
            0.0, 1.0, 0.0, //
            -s, 0.0, c,
        )
    }

    /// Right-handed rotation about Z by `t` radians
    pub fn rotation_z(t: f32) -> Mat3 {
        let (s, c) = t.sin_cos();
        Mat3::new(
            c, -s, 0.0, //
            s, c, 0.0, //
            0.0, 0.0, 1.0,
        )
    }

    pub fn rotation(axis: Axis, t: f32) -> Mat3 {
        match axis {
            Axis::X => Self::rotation_x(t),
            Axis::Y => Self::rotation_y(t),
            Axis::Z => Self::rotation_z(t),
        }
    }
}

/// The three elementary rotations for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameRotations {
    x: Mat3,
    y: Mat3,
    z: Mat3,
}

impl FrameRotations {
    pub fn at(t: f32) -> Self {
        Self {
            x: Transform::rotation_x(t),
            y: Transform::rotation_y(t),
            z: Transform::rotation_z(t),
        }
    }

    pub fn matrix(&self, axis: Axis) -> &Mat3 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Rotate `v` by every enabled axis, in [`ROTATION_ORDER`]
    pub fn apply(&self, axes: RotationAxes, v: &Vec3) -> Vec3 {
        ROTATION_ORDER
            .iter()
            .filter(|axis| axes.is_enabled(**axis))
            .fold(*v, |acc, axis| mul_mat3_vec3(self.matrix(*axis), &acc))
    }
}
