/// Camera and projection utilities
use nalgebra::{Point2, Point3, Vector3};

use crate::config::RenderConfig;
use crate::geometry::{Face, Mesh};
use crate::math::Vector3Ops;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera at the origin looking down +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub mode: ProjectionMode,
    pub zoom: f64,
}

impl Camera {
    pub fn new(mode: ProjectionMode, zoom: f64) -> Self {
        Self { mode, zoom }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.projection, config.zoom())
    }

    /// Project a 3D point onto the centered 2D surface.
    ///
    /// Points on the camera plane (`z == 0`) project to infinity in perspective
    /// mode; the puzzle is always placed in front of the camera.
    pub fn project(&self, p: &Point3<f64>) -> Point2<f64> {
        match self.mode {
            ProjectionMode::Perspective => {
                Point2::new(p.x / p.z * self.zoom, p.y / p.z * self.zoom)
            }
            ProjectionMode::Orthographic => Point2::new(p.x, p.y),
        }
    }

    pub fn project_quad(&self, quad: &[Point3<f64>; 4]) -> [Point2<f64>; 4] {
        quad.map(|p| self.project(&p))
    }

    /// Direction from `face` toward the camera.
    pub fn to_camera(&self, mesh: &Mesh, face: &Face) -> Vector3<f64> {
        match self.mode {
            ProjectionMode::Perspective => Vector3Ops::neg(&mesh.centroid(face).coords),
            ProjectionMode::Orthographic => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// Back-face test: the face's normal must point toward the camera.
    pub fn faces_camera(&self, mesh: &Mesh, face: &Face) -> bool {
        Vector3Ops::dot(&mesh.face_normal(face), &self.to_camera(mesh, face)) > 0.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}
