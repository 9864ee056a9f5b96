/// Vector and quaternion helpers shared by the puzzle, renderer and picker
use nalgebra::{Matrix3, Point3, Quaternion, Vector2, Vector3};

/// Operations on projected, screen-space vectors.
pub struct Vector2Ops;

impl Vector2Ops {
    pub fn dot(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
        a.dot(b)
    }

    /// Signed scalar cross product, twice the signed area of the triangle `(0, a, b)`.
    pub fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
        a.perp(b)
    }

    pub fn sub(a: &Vector2<f64>, b: &Vector2<f64>) -> Vector2<f64> {
        a - b
    }

    pub fn neg(a: &Vector2<f64>) -> Vector2<f64> {
        -a
    }
}

/// Operations on world-space vectors.
pub struct Vector3Ops;

impl Vector3Ops {
    pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        a.dot(b)
    }

    pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
        a.cross(b)
    }

    pub fn sub(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
        a - b
    }

    pub fn neg(a: &Vector3<f64>) -> Vector3<f64> {
        -a
    }
}

/// The rotation matrix encoded by `q`.
///
/// `q` is expected to be of unit norm; no normalization happens here, so a
/// drifted quaternion also scales the points it rotates.
pub fn rotation_matrix(q: &Quaternion<f64>) -> Matrix3<f64> {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);

    Matrix3::new(
        w * w + x * x - y * y - z * z,
        2.0 * (x * y - w * z),
        2.0 * (z * x + w * y),
        2.0 * (x * y + w * z),
        w * w + y * y - x * x - z * z,
        2.0 * (y * z - w * x),
        2.0 * (z * x - w * y),
        2.0 * (y * z + w * x),
        w * w + z * z - x * x - y * y,
    )
}

/// Rotate `p` by `q` about `pivot`.
pub fn rotate_point(p: &Point3<f64>, q: &Quaternion<f64>, pivot: &Point3<f64>) -> Point3<f64> {
    pivot + rotation_matrix(q) * (p - pivot)
}

/// Rotate `p` by `q` about the origin.
pub fn rotate_point_about_origin(p: &Point3<f64>, q: &Quaternion<f64>) -> Point3<f64> {
    rotate_point(p, q, &Point3::origin())
}

/// Hamilton product `a∘b`: applying the result rotates by `b`, then by `a`.
///
/// The result is not normalized.
pub fn compose(a: &Quaternion<f64>, b: &Quaternion<f64>) -> Quaternion<f64> {
    *a * *b
}

/// Build a rotation of `angle` radians about `axis`.
///
/// `axis` should be a unit vector. The whole 4-tuple is divided by its norm
/// afterwards, which keeps the result unit length but shrinks the effective
/// angle for longer axes. A zero axis yields the identity.
pub fn axis_angle(axis: &Vector3<f64>, angle: f64) -> Quaternion<f64> {
    let half = angle / 2.0;
    let (sin, cos) = half.sin_cos();
    let q = Quaternion::new(cos, axis.x * sin, axis.y * sin, axis.z * sin);
    renormalize(&q)
}

/// Divide `q` by its Euclidean norm. Degenerate input collapses to identity.
pub fn renormalize(q: &Quaternion<f64>) -> Quaternion<f64> {
    q.coords
        .try_normalize(f64::EPSILON)
        .map(Quaternion::from_vector)
        .unwrap_or_else(Quaternion::identity)
}
