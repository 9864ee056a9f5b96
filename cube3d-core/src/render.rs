/// Painter's-algorithm renderer over an abstract 2D drawing surface
use nalgebra::Point2;

use crate::color::Rgb;
use crate::config::RenderConfig;
use crate::geometry::{Face, Mesh};
use crate::projection::Camera;

const DEBUG_EDGE: Rgb = Rgb::new(0x80, 0x80, 0x80);
const DEBUG_VERTEX: Rgb = Rgb::new(0xff, 0x00, 0xff);
const DEBUG_DOT_RADIUS: f64 = 2.0;

/// The drawing collaborator. Coordinates are already projected; the renderer
/// centers them with [`DrawSurface::translate`].
pub trait DrawSurface {
    type Error;

    /// Clear the `width` × `height` region at the untranslated origin.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;
    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), Self::Error>;
    fn reset_transform(&mut self) -> Result<(), Self::Error>;
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point2<f64>);
    fn line_to(&mut self, p: Point2<f64>);
    fn close_path(&mut self);
    fn fill(&mut self, color: Rgb) -> Result<(), Self::Error>;
    fn stroke(&mut self, color: Rgb) -> Result<(), Self::Error>;
    fn arc(&mut self, center: Point2<f64>, radius: f64) -> Result<(), Self::Error>;
    fn fill_text(&mut self, text: &str, at: Point2<f64>, color: Rgb) -> Result<(), Self::Error>;
}

/// Faces in painting order: back-facing faces dropped, farthest first.
pub fn draw_order<'a>(mesh: &'a Mesh, camera: &Camera) -> Vec<&'a Face> {
    let mut faces: Vec<(f64, &Face)> = mesh
        .faces
        .iter()
        .map(|face| (mesh.mean_depth(face), face))
        .collect();
    faces.sort_by(|a, b| b.0.total_cmp(&a.0));

    faces
        .into_iter()
        .map(|(_, face)| face)
        .filter(|face| camera.faces_camera(mesh, face))
        .collect()
}

/// Fills the visible faces of a mesh onto a surface of a known size.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: f64,
    height: f64,
}

impl Renderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn render<S: DrawSurface>(
        &self,
        surface: &mut S,
        mesh: &Mesh,
        config: &RenderConfig,
    ) -> Result<(), S::Error> {
        let camera = Camera::from_config(config);

        surface.clear(self.width, self.height)?;
        surface.translate(self.width / 2.0, self.height / 2.0)?;

        for face in draw_order(mesh, &camera) {
            let quad = camera.project_quad(&mesh.quad(face));
            surface.begin_path();
            surface.move_to(quad[0]);
            for &p in &quad[1..] {
                surface.line_to(p);
            }
            surface.close_path();
            surface.fill(face.colors.outer)?;
        }

        if config.debug {
            self.render_debug(surface, mesh, &camera)?;
        }

        surface.reset_transform()
    }

    fn render_debug<S: DrawSurface>(
        &self,
        surface: &mut S,
        mesh: &Mesh,
        camera: &Camera,
    ) -> Result<(), S::Error> {
        let projected: Vec<Point2<f64>> = mesh.vertices.iter().map(|v| camera.project(v)).collect();

        for &[a, b] in &mesh.edges {
            surface.begin_path();
            surface.move_to(projected[a]);
            surface.line_to(projected[b]);
            surface.stroke(DEBUG_EDGE)?;
        }

        for (i, &p) in projected.iter().enumerate() {
            surface.begin_path();
            surface.arc(p, DEBUG_DOT_RADIUS)?;
            surface.close_path();
            surface.fill(DEBUG_VERTEX)?;
            surface.fill_text(&i.to_string(), p, DEBUG_VERTEX)?;
        }
        Ok(())
    }
}
