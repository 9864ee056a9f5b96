/// A single sub-cube of the puzzle
use nalgebra::{Point3, Quaternion, Vector3};

use crate::color::FaceColors;
use crate::geometry::{Face, Mesh};
use crate::math::{compose, rotate_point};

/// Corner sign patterns, in vertex index order.
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

pub const EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [0, 2],
    [0, 4],
    [1, 3],
    [1, 5],
    [2, 3],
    [2, 6],
    [3, 7],
    [4, 5],
    [4, 6],
    [5, 7],
    [6, 7],
];

/// Clockwise faces: top, bottom, left, right, back, front.
pub const FACES: [[usize; 4]; 6] = [
    [0, 4, 5, 1],
    [2, 3, 7, 6],
    [1, 3, 2, 0],
    [6, 7, 5, 4],
    [1, 5, 7, 3],
    [0, 2, 6, 4],
];

/// Face slots in the order used by [`FACES`] and [`Solid::face_colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSlot {
    Top,
    Bottom,
    Left,
    Right,
    Back,
    Front,
}

impl FaceSlot {
    pub const ALL: [FaceSlot; 6] = [
        FaceSlot::Top,
        FaceSlot::Bottom,
        FaceSlot::Left,
        FaceSlot::Right,
        FaceSlot::Back,
        FaceSlot::Front,
    ];

    /// Outward direction of the face before any rotation.
    pub fn normal(self) -> Vector3<f64> {
        match self {
            FaceSlot::Top => -Vector3::y(),
            FaceSlot::Bottom => Vector3::y(),
            FaceSlot::Left => -Vector3::x(),
            FaceSlot::Right => Vector3::x(),
            FaceSlot::Back => Vector3::z(),
            FaceSlot::Front => -Vector3::z(),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One cube: a center, an edge length, six face color pairs and a local spin.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub center: Point3<f64>,
    pub size: f64,
    pub orientation: Quaternion<f64>,
    pub face_colors: [FaceColors; 6],
}

impl Solid {
    pub fn new(center: Point3<f64>, size: f64, face_colors: [FaceColors; 6]) -> Self {
        Self {
            center,
            size,
            orientation: Quaternion::identity(),
            face_colors,
        }
    }

    /// The eight corners, rotated by the solid's orientation about its center.
    pub fn vertices(&self) -> [Point3<f64>; 8] {
        let half = self.size / 2.0;
        CORNERS.map(|[sx, sy, sz]| {
            let corner = self.center + Vector3::new(sx, sy, sz) * half;
            rotate_point(&corner, &self.orientation, &self.center)
        })
    }

    pub fn compute_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(CORNERS.len(), EDGES.len(), FACES.len());
        mesh.vertices.extend(self.vertices());
        mesh.edges.extend(EDGES);
        mesh.faces.extend(
            FACES
                .iter()
                .zip(self.face_colors)
                .map(|(&indices, colors)| Face::new(indices, colors)),
        );
        mesh
    }

    /// Rotate the whole solid by `q` about `pivot`, in the frame the solid lives in.
    pub fn rotate_about(&mut self, q: &Quaternion<f64>, pivot: &Point3<f64>) {
        self.center = rotate_point(&self.center, q, pivot);
        self.orientation = compose(q, &self.orientation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::axis_angle;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn solid() -> Solid {
        Solid::new(Point3::new(16.0, 0.0, 50.0), 16.0, [FaceColors::body(); 6])
    }

    #[test]
    fn test_mesh_topology() {
        let mesh = solid().compute_mesh();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.edges.len(), 12);
        assert_eq!(mesh.faces.len(), 6);
        for edge in &mesh.edges {
            assert!(edge.iter().all(|&i| i < 8));
        }
        for face in &mesh.faces {
            assert_eq!(face.indices.len(), 4);
            assert!(face.indices.iter().all(|&i| i < 8));
        }
    }

    #[test]
    fn test_template_offsets() {
        let s = solid();
        for (v, [sx, sy, sz]) in s.vertices().iter().zip(CORNERS) {
            assert_relative_eq!(*v - s.center, Vector3::new(sx, sy, sz) * 8.0);
        }
    }

    #[test]
    fn test_faces_point_outward() {
        let s = solid();
        let mesh = s.compute_mesh();
        for (face, slot) in mesh.faces.iter().zip(FaceSlot::ALL) {
            let normal = mesh.face_normal(face).normalize();
            assert_relative_eq!(normal, slot.normal(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotate_about_keeps_shape() {
        let mut s = solid();
        let q = axis_angle(&Vector3::y(), FRAC_PI_2);
        s.rotate_about(&q, &Point3::new(0.0, 0.0, 50.0));

        assert_relative_eq!(s.center, Point3::new(0.0, 0.0, 34.0), epsilon = 1e-9);
        assert_relative_eq!(s.orientation, q, epsilon = 1e-12);

        // still an axis-aligned cube of the same size
        for v in s.vertices() {
            let offset = v - s.center;
            for c in offset.iter() {
                assert_relative_eq!(c.abs(), 8.0, epsilon = 1e-9);
            }
        }
    }
}
