/// Mesh primitives for puzzle rendering and picking
use nalgebra::{Point3, Vector3};

use crate::color::FaceColors;
use crate::math::Vector3Ops;

/// Index of a solid in its puzzle, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolidId(pub usize);

/// A quad face: four vertex indices in clockwise winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 4],
    pub colors: FaceColors,
    /// The solid this face was generated from, set when meshes are merged.
    pub owner: Option<SolidId>,
}

impl Face {
    pub fn new(indices: [usize; 4], colors: FaceColors) -> Self {
        Self {
            indices,
            colors,
            owner: None,
        }
    }
}

/// Vertices, edges and quad faces.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub edges: Vec<[usize; 2]>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append `other`, shifting its indices past the vertices already present.
    pub fn append(&mut self, other: Mesh, owner: Option<SolidId>) {
        let offset = self.vertices.len();

        self.vertices.extend(other.vertices);
        self.edges
            .extend(other.edges.into_iter().map(|[a, b]| [a + offset, b + offset]));
        self.faces.extend(other.faces.into_iter().map(|face| Face {
            indices: face.indices.map(|i| i + offset),
            colors: face.colors,
            owner: owner.or(face.owner),
        }));
    }

    /// The four corners of `face`.
    pub fn quad(&self, face: &Face) -> [Point3<f64>; 4] {
        face.indices.map(|i| self.vertices[i])
    }

    /// Mean `z` of the corners of `face`, its painter's depth.
    pub fn mean_depth(&self, face: &Face) -> f64 {
        self.quad(face).iter().map(|p| p.z).sum::<f64>() / 4.0
    }

    /// Geometric centroid of `face`.
    pub fn centroid(&self, face: &Face) -> Point3<f64> {
        let sum = self
            .quad(face)
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / 4.0)
    }

    /// Unnormalized normal from the first three corners; outward for clockwise faces.
    pub fn face_normal(&self, face: &Face) -> Vector3<f64> {
        let [v0, v1, v2, _] = self.quad(face);
        Vector3Ops::cross(&(v1 - v0), &(v2 - v0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(z: f64) -> Mesh {
        Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, z),
                Point3::new(0.0, 1.0, z),
                Point3::new(1.0, 1.0, z),
                Point3::new(1.0, 0.0, z),
            ],
            edges: vec![[0, 1], [1, 2], [2, 3], [3, 0]],
            faces: vec![Face::new([0, 1, 2, 3], FaceColors::body())],
        }
    }

    #[test]
    fn test_append_renumbers() {
        let mut mesh = unit_square(1.0);
        mesh.append(unit_square(2.0), Some(SolidId(7)));

        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.edges[4], [4, 5]);
        assert_eq!(mesh.faces[1].indices, [4, 5, 6, 7]);
        assert_eq!(mesh.faces[1].owner, Some(SolidId(7)));
        assert_eq!(mesh.faces[0].owner, None);
    }

    #[test]
    fn test_face_measures() {
        let mesh = unit_square(3.0);
        let face = mesh.faces[0];
        assert_eq!(mesh.mean_depth(&face), 3.0);
        assert_eq!(mesh.centroid(&face), Point3::new(0.5, 0.5, 3.0));
        // clockwise on screen (y down) faces the camera at the origin
        assert!(mesh.face_normal(&face).z < 0.0);
    }
}
