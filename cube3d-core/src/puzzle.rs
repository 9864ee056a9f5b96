/// The 3×3×3 puzzle: 26 solids sharing a global transform
use nalgebra::{Point3, Quaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

use crate::color::{FaceColors, BODY, STICKERS};
use crate::geometry::{Mesh, SolidId};
use crate::math::{axis_angle, compose, renormalize, rotate_point};
use crate::solid::{FaceSlot, Solid};

/// Default placement: in front of the camera, which sits at the origin looking down +z.
pub fn default_center() -> Point3<f64> {
    Point3::new(0.0, 0.0, 50.0)
}

pub const DEFAULT_SIDE: f64 = 48.0;

/// Solids per outer slice.
pub const SLICE_SIZE: usize = 9;

/// A lattice axis of the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone)]
pub struct Puzzle {
    solids: Vec<Solid>,
    center: Point3<f64>,
    orientation: Quaternion<f64>,
    side: f64,
}

impl Puzzle {
    /// Build a solved puzzle of overall edge length `side` centered at `center`.
    pub fn new(center: Point3<f64>, side: f64) -> Self {
        Self {
            solids: lattice(&center, side),
            center,
            orientation: Quaternion::identity(),
            side,
        }
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn solid(&self, id: SolidId) -> &Solid {
        &self.solids[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = SolidId> {
        (0..self.solids.len()).map(SolidId)
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn orientation(&self) -> Quaternion<f64> {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Quaternion<f64>) {
        self.orientation = orientation;
    }

    /// Left-compose `q` onto the global orientation.
    pub fn rotate(&mut self, q: &Quaternion<f64>, renormalized: bool) {
        self.orientation = compose(q, &self.orientation);
        if renormalized {
            self.orientation = renormalize(&self.orientation);
        }
    }

    /// Edge length of each solid, which is also the lattice spacing.
    pub fn cube_size(&self) -> f64 {
        self.side / 3.0
    }

    /// Apply the global transform to a point in puzzle space.
    pub fn to_world(&self, p: &Point3<f64>) -> Point3<f64> {
        rotate_point(p, &self.orientation, &self.center)
    }

    /// All solids merged into one mesh in world space, faces tagged with their owner.
    pub fn compute_mesh(&self) -> Mesh {
        let n = self.solids.len();
        let mut merged = Mesh::with_capacity(n * 8, n * 12, n * 6);
        for (id, solid) in self.ids().zip(&self.solids) {
            let mut mesh = solid.compute_mesh();
            for v in &mut mesh.vertices {
                *v = self.to_world(v);
            }
            merged.append(mesh, Some(id));
        }
        merged
    }

    /// Rotate `ids` by `angle` about `axis` (puzzle space), pivoting at their mean center.
    pub fn rotate_solids(&mut self, ids: &[SolidId], axis: &Vector3<f64>, angle: f64) {
        if ids.is_empty() {
            return;
        }
        let sum = ids
            .iter()
            .fold(Vector3::zeros(), |acc, id| acc + self.solids[id.0].center.coords);
        let pivot = Point3::from(sum / ids.len() as f64);
        let q = axis_angle(axis, angle);

        for id in ids {
            self.solids[id.0].rotate_about(&q, &pivot);
        }
    }

    /// Solids whose center lies in lattice `layer` (-1, 0 or 1) along `axis`.
    pub fn slice(&self, axis: Axis, layer: i32) -> Vec<SolidId> {
        let spacing = self.cube_size();
        let target = self.center[axis.index()] + layer as f64 * spacing;
        self.ids()
            .filter(|id| (self.solid(*id).center[axis.index()] - target).abs() < spacing / 2.0)
            .collect()
    }

    /// Turn a lattice slice by `quarter_turns` × 90° about `axis`.
    pub fn turn_slice(&mut self, axis: Axis, layer: i32, quarter_turns: i32) {
        let ids = self.slice(axis, layer);
        log::debug!("turning {axis:?} layer {layer} by {quarter_turns} quarter turns");
        self.rotate_solids(&ids, &axis.unit_vector(), quarter_turns as f64 * FRAC_PI_2);
    }

    /// Restore the solved arrangement and identity orientation.
    pub fn reset(&mut self) {
        *self = Self::new(self.center, self.side);
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new(default_center(), DEFAULT_SIDE)
    }
}

/// Solids on the ±offset lattice, x outermost, with the hidden core left out.
fn lattice(center: &Point3<f64>, side: f64) -> Vec<Solid> {
    let size = side / 3.0;
    let mut solids = Vec::with_capacity(26);
    for i in -1..=1 {
        for j in -1..=1 {
            for k in -1..=1 {
                if (i, j, k) == (0, 0, 0) {
                    continue;
                }
                let position = center + Vector3::new(i as f64, j as f64, k as f64) * size;
                solids.push(Solid::new(position, size, face_colors([i, j, k])));
            }
        }
    }
    solids
}

/// Stickers on the faces that sit on the puzzle's exterior.
fn face_colors(lattice: [i32; 3]) -> [FaceColors; 6] {
    FaceSlot::ALL.map(|slot| {
        let normal = slot.normal();
        let exposed = (0..3).any(|a| normal[a] != 0.0 && normal[a] as i32 == lattice[a]);
        if exposed {
            FaceColors::new(STICKERS[slot.index()], BODY)
        } else {
            FaceColors::body()
        }
    })
}
