/// Screen-space face picking
use nalgebra::{Point2, Point3};

use crate::geometry::{Mesh, SolidId};
use crate::math::Vector2Ops;
use crate::projection::Camera;

/// Relative tolerance of the point-in-quad area comparison.
const AREA_TOLERANCE: f64 = 1e-9;

/// The face under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub solid: SolidId,
    /// Index of the face in the merged mesh.
    pub face: usize,
    pub quad_2d: [Point2<f64>; 4],
    /// World-space corners, puzzle rotation already applied.
    pub quad_3d: [Point3<f64>; 4],
}

/// Twice the unsigned area of triangle `abc`.
fn triangle_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    Vector2Ops::cross(&Vector2Ops::sub(&b.coords, &a.coords), &Vector2Ops::sub(&c.coords, &a.coords)).abs()
}

fn in_bounding_box(quad: &[Point2<f64>; 4], p: &Point2<f64>) -> bool {
    let (min_x, max_x) = quad
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), q| (lo.min(q.x), hi.max(q.x)));
    let (min_y, max_y) = quad
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), q| (lo.min(q.y), hi.max(q.y)));
    (min_x..=max_x).contains(&p.x) && (min_y..=max_y).contains(&p.y)
}

/// Whether `p` lies inside the convex quad, by comparing its area against the
/// four triangles `p` forms with the quad's edges.
pub fn point_in_quad(quad: &[Point2<f64>; 4], p: &Point2<f64>) -> bool {
    let area = triangle_area(&quad[0], &quad[1], &quad[2]) + triangle_area(&quad[0], &quad[2], &quad[3]);
    let fan: f64 = (0..4)
        .map(|i| triangle_area(p, &quad[i], &quad[(i + 1) % 4]))
        .sum();
    (fan - area).abs() <= AREA_TOLERANCE * area.max(1.0)
}

/// Find the nearest camera-facing face whose projection contains `pointer`.
///
/// `pointer` is in the surface's centered frame. Faces are tried nearest first;
/// faces at equal depth are ordered by how close their projected centroid is
/// to the pointer.
pub fn pick(mesh: &Mesh, camera: &Camera, pointer: &Point2<f64>) -> Option<Pick> {
    let mut candidates: Vec<(f64, f64, usize)> = mesh
        .faces
        .iter()
        .enumerate()
        .filter(|(_, face)| face.owner.is_some() && camera.faces_camera(mesh, face))
        .map(|(i, face)| {
            let centroid = camera.project(&mesh.centroid(face));
            (mesh.mean_depth(face), (centroid - pointer).norm(), i)
        })
        .collect();
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    candidates.into_iter().find_map(|(_, _, i)| {
        let face = &mesh.faces[i];
        let quad_3d = mesh.quad(face);
        let quad_2d = camera.project_quad(&quad_3d);
        if !in_bounding_box(&quad_2d, pointer) || !point_in_quad(&quad_2d, pointer) {
            return None;
        }
        Some(Pick {
            solid: face.owner?,
            face: i,
            quad_2d,
            quad_3d,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionMode;
    use crate::puzzle::Puzzle;
    use crate::solid::FaceSlot;

    fn square() -> [Point2<f64>; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
        ]
    }

    #[test]
    fn test_point_in_quad() {
        let quad = square();
        assert!(point_in_quad(&quad, &Point2::new(5.0, 5.0)));
        assert!(point_in_quad(&quad, &Point2::new(0.0, 3.0)));
        assert!(!point_in_quad(&quad, &Point2::new(11.0, 5.0)));
        assert!(!point_in_quad(&quad, &Point2::new(-0.1, -0.1)));
    }

    #[test]
    fn test_skewed_quad() {
        let quad = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 10.0),
            Point2::new(12.0, 8.0),
            Point2::new(9.0, -1.0),
        ];
        let center = Point2::new(23.0 / 4.0, 17.0 / 4.0);
        assert!(point_in_quad(&quad, &center));
        // inside the bounding box but outside the quad
        assert!(in_bounding_box(&quad, &Point2::new(0.5, 9.0)));
        assert!(!point_in_quad(&quad, &Point2::new(0.5, 9.0)));
    }

    #[test]
    fn test_pick_face_center() {
        let puzzle = Puzzle::default();
        let mesh = puzzle.compute_mesh();
        let camera = Camera::default();

        // front face of the solid at the top-left-front corner
        let face = &mesh.faces[FaceSlot::Front.index()];
        let centroid = camera.project(&mesh.centroid(face));
        let hit = pick(&mesh, &camera, &centroid).expect("centroid is on the face");

        assert_eq!(hit.solid, SolidId(0));
        assert_eq!(hit.face, FaceSlot::Front.index());
        assert_eq!(hit.quad_3d, mesh.quad(face));
        assert!(point_in_quad(&hit.quad_2d, &centroid));
    }

    #[test]
    fn test_pick_prefers_nearest() {
        let puzzle = Puzzle::default();
        let mesh = puzzle.compute_mesh();
        let camera = Camera::default();

        // straight ahead: the front center solid, not anything behind it
        let hit = pick(&mesh, &camera, &Point2::origin()).unwrap();
        let solid = puzzle.solid(hit.solid);
        assert_eq!(solid.center, Point3::new(0.0, 0.0, 34.0));
        assert_eq!(hit.face % 6, FaceSlot::Front.index());
    }

    #[test]
    fn test_pick_miss() {
        let mesh = Puzzle::default().compute_mesh();
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let camera = Camera::new(mode, 256.0);
            assert_eq!(pick(&mesh, &camera, &Point2::new(5000.0, -5000.0)), None);
        }
    }
}
