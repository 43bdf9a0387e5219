/// Fixed-size vector and matrix products used by the projection pipeline
use nalgebra::{Matrix2x3, Matrix3, Vector2, Vector3};

/// A point or direction in model space
pub type Vec3 = Vector3<f32>;

/// A 3x3 linear transform (rotations)
pub type Mat3 = Matrix3<f32>;

/// A 2x3 projection from model space onto the screen plane
pub type ProjectionMatrix = Matrix2x3<f32>;

/// A projected point in normalized (pre-scale) screen space
pub type Point2D = Vector2<f32>;

/// Multiply a 3x3 matrix by a 3-vector, row times column
pub fn mul_mat3_vec3(m: &Mat3, v: &Vec3) -> Vec3 {
    m * v
}

/// Apply a 2x3 projection to a 3-vector, keeping the two screen components
pub fn project_vec3(p: &ProjectionMatrix, v: &Vec3) -> Point2D {
    p * v
}
