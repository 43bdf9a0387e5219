/// Camera and projection utilities
use crate::math::{project_vec3, Point2D, ProjectionMatrix, Vec3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
        }
    }

    pub fn is_orthographic(self) -> bool {
        self == ProjectionMode::Orthographic
    }

    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Orthographic => "orthographic",
            ProjectionMode::Perspective => "perspective",
        }
    }
}

impl Default for ProjectionMode {
    fn default() -> Self {
        ProjectionMode::Perspective
    }
}

/// Perspective divisor for a vertex at depth `rotated_z`.
///
/// Not guarded: `distance == rotated_z` yields an infinite factor, which
/// only affects the frame it occurs in.
pub fn depth_factor(distance: f32, rotated_z: f32) -> f32 {
    1.0 / (distance - rotated_z)
}

/// Viewer looking down the Z axis from `distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(distance: f32, mode: ProjectionMode) -> Self {
        Self { distance, mode }
    }

    /// Create the projection matrix for a vertex at depth `rotated_z`
    pub fn projection_matrix(&self, rotated_z: f32) -> ProjectionMatrix {
        let scale = match self.mode {
            ProjectionMode::Orthographic => 1.0 / self.distance,
            ProjectionMode::Perspective => depth_factor(self.distance, rotated_z),
        };
        ProjectionMatrix::new(
            scale, 0.0, 0.0, //
            0.0, scale, 0.0,
        )
    }

    /// Project a rotated vertex onto the normalized screen plane
    pub fn project(&self, rotated: &Vec3) -> Point2D {
        project_vec3(&self.projection_matrix(rotated.z), rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_projection() {
        let camera = Camera::new(2.0, ProjectionMode::Perspective);
        let projected = camera.project(&Vec3::new(-0.5, -0.5, -0.5));
        assert_relative_eq!(projected, Point2D::new(-0.2, -0.2), epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_depends_on_depth() {
        let camera = Camera::new(2.0, ProjectionMode::Perspective);
        let near = camera.project(&Vec3::new(0.5, 0.5, 0.5));
        let far = camera.project(&Vec3::new(0.5, 0.5, -0.5));
        assert!(near.x > far.x);
    }

    #[test]
    fn test_orthographic_ignores_depth() {
        let camera = Camera::new(4.0, ProjectionMode::Orthographic);
        let front = camera.project(&Vec3::new(0.5, -0.5, 0.5));
        let back = camera.project(&Vec3::new(0.5, -0.5, -0.5));
        assert_eq!(front, back);
        assert_relative_eq!(front, Point2D::new(0.125, -0.125), epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_depth_propagates() {
        let camera = Camera::new(0.5, ProjectionMode::Perspective);
        let projected = camera.project(&Vec3::new(0.5, 0.0, 0.5));
        assert!(projected.x.is_infinite());
        assert!(projected.y.is_nan());
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(ProjectionMode::default(), ProjectionMode::Perspective);
        assert!(ProjectionMode::Perspective.toggled().is_orthographic());
        assert!(!ProjectionMode::Orthographic.toggled().is_orthographic());
    }
}
