/// Per-frame transform pipeline: rotate, then project, every cube vertex
use crate::geometry::{Cube, VERTEX_COUNT};
use crate::math::Point2D;
use crate::settings::Settings;
use crate::transform::FrameRotations;

/// Turns the static cube into this frame's projected points
#[derive(Debug, Clone)]
pub struct Pipeline {
    cube: Cube,
    projected: [Point2D; VERTEX_COUNT],
}

impl Pipeline {
    pub fn new(cube: Cube) -> Self {
        Self {
            cube,
            projected: [Point2D::zeros(); VERTEX_COUNT],
        }
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Points from the most recent [`Pipeline::run`]
    pub fn projected(&self) -> &[Point2D; VERTEX_COUNT] {
        &self.projected
    }

    /// Project all vertices for elapsed time `time` under one settings snapshot
    pub fn run(&mut self, time: f32, settings: &Settings) -> &[Point2D; VERTEX_COUNT] {
        let rotations = FrameRotations::at(time);
        let axes = settings.rotation();
        let camera = settings.camera();

        for (slot, vertex) in self.projected.iter_mut().zip(self.cube.vertices()) {
            let rotated = rotations.apply(axes, vertex);
            *slot = camera.project(&rotated);
        }

        &self.projected
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Cube::unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionMode;
    use crate::settings::SettingsUpdate;
    use crate::transform::{Axis, RotationAxes};
    use approx::assert_relative_eq;

    fn still_settings() -> Settings {
        let mut settings = Settings::default();
        settings.set_rotation(RotationAxes::none());
        settings
    }

    #[test]
    fn test_canonical_perspective_frame() {
        let mut pipeline = Pipeline::default();
        let settings = still_settings();
        let projected = *pipeline.run(0.0, &settings);

        // z = 1 / (2 - vz): 0.4 on the back face, 2/3 on the front face
        let back = 0.4_f32;
        let front = 1.0_f32 / 1.5;
        let expected = [
            (-0.5 * back, -0.5 * back),
            (0.5 * back, -0.5 * back),
            (0.5 * back, 0.5 * back),
            (-0.5 * back, 0.5 * back),
            (-0.5 * front, -0.5 * front),
            (0.5 * front, -0.5 * front),
            (0.5 * front, 0.5 * front),
            (-0.5 * front, 0.5 * front),
        ];
        for (point, (x, y)) in projected.iter().zip(expected) {
            assert_relative_eq!(*point, Point2D::new(x, y), epsilon = 1e-6);
        }
        assert_relative_eq!(projected[0], Point2D::new(-0.2, -0.2), epsilon = 1e-6);
    }

    #[test]
    fn test_enabled_axes_at_time_zero_are_identity() {
        let mut pipeline = Pipeline::default();
        let still = *pipeline.run(0.0, &still_settings());
        let spinning = *pipeline.run(0.0, &Settings::default());
        for i in 0..VERTEX_COUNT {
            assert_relative_eq!(still[i], spinning[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_orthographic_flattens_depth() {
        let mut pipeline = Pipeline::default();
        let mut settings = still_settings();
        settings.apply(SettingsUpdate::Projection(ProjectionMode::Orthographic)).unwrap();
        let projected = *pipeline.run(0.0, &settings);

        // Vertices i and i + 4 differ only in z
        for i in 0..4 {
            assert_eq!(projected[i], projected[i + 4]);
        }
        assert_relative_eq!(projected[6], Point2D::new(0.25, 0.25), epsilon = 1e-6);
    }

    #[test]
    fn test_disabled_axis_contributes_nothing() {
        let mut pipeline = Pipeline::default();
        let time = 2.5;

        let mut only_y = still_settings();
        only_y.apply(SettingsUpdate::Rotate(Axis::Y, true)).unwrap();
        let with_y = *pipeline.run(time, &only_y);

        let mut reference = Pipeline::default();
        let rotated_then_still = {
            let rotations = FrameRotations::at(time);
            let camera = only_y.camera();
            let mut out = [Point2D::zeros(); VERTEX_COUNT];
            for (slot, v) in out.iter_mut().zip(reference.cube().vertices()) {
                *slot = camera.project(&(rotations.matrix(Axis::Y) * v));
            }
            out
        };
        for i in 0..VERTEX_COUNT {
            assert_relative_eq!(with_y[i], rotated_then_still[i], epsilon = 1e-6);
        }

        // Time has no effect when every axis is off
        let a = *reference.run(0.7, &still_settings());
        let b = *reference.run(5.3, &still_settings());
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_axes_regression() {
        let mut pipeline = Pipeline::default();
        let projected = *pipeline.run(1.0, &Settings::default());

        // Vertex 0 rotated Z, then X, then Y by 1 radian, then projected at distance 2
        let (s, c) = 1.0_f32.sin_cos();
        let (x, y, z) = (-0.5_f32, -0.5_f32, -0.5_f32);
        let (x, y) = (c * x - s * y, s * x + c * y);
        let (y, z) = (c * y - s * z, s * y + c * z);
        let (x, z) = (c * x + s * z, -s * x + c * z);
        let depth = 1.0 / (2.0 - z);

        assert_relative_eq!(projected[0], Point2D::new(x * depth, y * depth), epsilon = 1e-5);
    }

    #[test]
    fn test_run_overwrites_previous_frame() {
        let mut pipeline = Pipeline::default();
        let first = *pipeline.run(0.3, &Settings::default());
        let second = *pipeline.run(0.9, &Settings::default());
        assert_ne!(first, second);
        assert_eq!(pipeline.projected(), &second);
    }
}
