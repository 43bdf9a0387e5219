/// Fixed wireframe cube geometry
use crate::math::Vec3;

/// Number of cube corners
pub const VERTEX_COUNT: usize = 8;

/// Number of cube edges
pub const EDGE_COUNT: usize = 12;

/// Half the side length of the unit cube
pub const HALF_EXTENT: f32 = 0.5;

/// A wireframe edge joining two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    pub fn touches(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// The opposite end of the edge, if `index` is one of its ends
    pub fn other(&self, index: usize) -> Option<usize> {
        if index == self.a {
            Some(self.b)
        } else if index == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A unit cube centred at the origin, as 8 vertices and 12 edges
///
/// Vertices 0-3 form the back face (z = -0.5), counter-clockwise from
/// (-,-); vertices 4-7 form the front face in the same order.
#[derive(Debug, Clone)]
pub struct Cube {
    vertices: [Vec3; VERTEX_COUNT],
    edges: [Edge; EDGE_COUNT],
}

impl Cube {
    pub fn unit() -> Self {
        let h = HALF_EXTENT;
        let vertices = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];

        // For each corner of the back face: the connector to the front
        // face, then the next edge around each face.
        let mut edges = [Edge::new(0, 0); EDGE_COUNT];
        for i in 0..4 {
            let next = (i + 1) % 4;
            edges[i * 3] = Edge::new(i, i + 4);
            edges[i * 3 + 1] = Edge::new(i, next);
            edges[i * 3 + 2] = Edge::new(i + 4, next + 4);
        }

        Self { vertices, edges }
    }

    pub fn vertices(&self) -> &[Vec3; VERTEX_COUNT] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge; EDGE_COUNT] {
        &self.edges
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::unit()
    }
}
