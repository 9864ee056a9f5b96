/// Recovering a slice turn from a drag over a picked face
use nalgebra::{Point3, Vector2, Vector3};
use std::f64::consts::FRAC_PI_2;

use crate::geometry::SolidId;
use crate::math::{Vector2Ops, Vector3Ops};
use crate::picking::Pick;
use crate::puzzle::{Axis, Puzzle, SLICE_SIZE};

/// Vertices closer than this to the cut plane count as lying on it.
const PLANE_EPSILON: f64 = 1e-9;

/// A plane `dot(normal, p) == offset` in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlane {
    pub normal: Vector3<f64>,
    pub offset: f64,
}

impl CutPlane {
    /// Signed side of `p`: -1, 0 or 1.
    pub fn side(&self, p: &Point3<f64>) -> i8 {
        let distance = Vector3Ops::dot(&p.coords, &self.normal) - self.offset;
        let tolerance = PLANE_EPSILON * self.normal.norm().max(1.0);
        if distance > tolerance {
            1
        } else if distance < -tolerance {
            -1
        } else {
            0
        }
    }

    /// Whether the plane passes through the body spanned by `vertices`.
    pub fn straddles(&self, vertices: &[Point3<f64>]) -> bool {
        let sides: Vec<i8> = vertices.iter().map(|v| self.side(v)).collect();
        sides.contains(&1) && sides.contains(&-1)
    }
}

/// How strongly `drag` runs along an edge pair, as the minimum of its dot
/// products with both edges and their negations. Lower means more parallel.
fn edge_pair_score(drag: &Vector2<f64>, first: &Vector2<f64>, second: &Vector2<f64>) -> f64 {
    [
        Vector2Ops::dot(drag, first),
        Vector2Ops::dot(drag, &Vector2Ops::neg(first)),
        Vector2Ops::dot(drag, second),
        Vector2Ops::dot(drag, &Vector2Ops::neg(second)),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}

/// Pick the 3D quad edge the drag runs along and cut through the picked solid
/// perpendicular to it.
pub fn cut_plane(puzzle: &Puzzle, pick: &Pick, drag: &Vector2<f64>) -> CutPlane {
    let [a, b, c, d] = pick.quad_2d.map(|p| p.coords);
    let [a3, b3, c3, _] = pick.quad_3d;

    let score_ab = edge_pair_score(drag, &Vector2Ops::sub(&b, &a), &Vector2Ops::sub(&d, &c));
    let score_bc = edge_pair_score(drag, &Vector2Ops::sub(&c, &b), &Vector2Ops::sub(&a, &d));

    let normal = if score_ab < score_bc { b3 - a3 } else { c3 - b3 };
    let center = puzzle.to_world(&puzzle.solid(pick.solid).center);

    CutPlane {
        normal,
        offset: Vector3Ops::dot(&normal, &center.coords),
    }
}

/// Solids the plane passes through, in creation order.
pub fn affected_solids(puzzle: &Puzzle, plane: &CutPlane) -> Vec<SolidId> {
    let affected: Vec<SolidId> = puzzle
        .ids()
        .filter(|&id| {
            let world = puzzle.solid(id).vertices().map(|v| puzzle.to_world(&v));
            plane.straddles(&world)
        })
        .collect();

    if affected.len() != SLICE_SIZE {
        log::warn!(
            "cut plane hit {} solids, expected {SLICE_SIZE}",
            affected.len()
        );
    }
    affected
}

/// The lattice axis shared by the affected solids, voted on by consecutive
/// triples of their centers. Colinear triples abstain.
pub fn common_axis(puzzle: &Puzzle, ids: &[SolidId]) -> Option<Axis> {
    let scale = puzzle.cube_size().powi(2);
    let votes: Vec<Axis> = ids
        .windows(3)
        .filter_map(|triple| {
            let [p0, p1, p2] = [triple[0], triple[1], triple[2]].map(|id| puzzle.solid(id).center);
            let normal = Vector3Ops::cross(&(p1 - p0), &(p2 - p0)) / scale;
            let rounded = normal.map(f64::round);
            if rounded == Vector3::zeros() {
                return None;
            }
            let unit = rounded.normalize();
            Axis::from_index(unit.iamax())
        })
        .collect();

    let first = *votes.first()?;
    if votes.iter().any(|axis| *axis != first) {
        log::warn!("affected solids disagree on the turn axis: {votes:?}, using {first:?}");
    }
    Some(first)
}

/// The outcome of a committed slice turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceTurn {
    pub affected: Vec<SolidId>,
    pub axis: Option<Axis>,
}

/// Infer and apply the slice turn for `drag` over `pick`.
///
/// The turn is always a positive quarter turn about the inferred axis; the
/// drag only selects the slice. When no axis can be inferred nothing moves.
pub fn turn_from_drag(puzzle: &mut Puzzle, pick: &Pick, drag: &Vector2<f64>) -> SliceTurn {
    let plane = cut_plane(puzzle, pick, drag);
    let affected = affected_solids(puzzle, &plane);
    let axis = common_axis(puzzle, &affected);

    match axis {
        Some(axis) => {
            log::debug!("turning {} solids about {axis:?}", affected.len());
            puzzle.rotate_solids(&affected, &axis.unit_vector(), FRAC_PI_2);
        }
        None => log::warn!("no turn axis for {} affected solids, skipping", affected.len()),
    }

    SliceTurn { affected, axis }
}
