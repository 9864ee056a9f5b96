/// Terminal cell canvas implementing the core drawing surface
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cube3d_core::{DrawSurface, Rgb};
use nalgebra::{Point2, Vector2};
use std::convert::Infallible;
use std::io::Write;

/// Height of a terminal cell in surface units; cells are about twice as tall as wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Segments used to approximate debug dots.
const ARC_SEGMENTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Filled(Rgb),
    Glyph(char, Rgb),
}

/// A grid of colored cells. One surface unit is one cell wide and half a cell tall.
pub struct CellCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    offset: Vector2<f64>,
    path: Vec<Point2<f64>>,
}

impl CellCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            offset: Vector2::zeros(),
            path: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Size in surface units.
    pub fn surface_size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64 * CELL_ASPECT)
    }

    /// Surface coordinates of the center of a cell.
    pub fn cell_center(column: u16, row: u16) -> (f64, f64) {
        (column as f64 + 0.5, (row as f64 + 0.5) * CELL_ASPECT)
    }

    fn cell_at(&self, p: &Point2<f64>) -> Option<usize> {
        let column = p.x.floor();
        let row = (p.y / CELL_ASPECT).floor();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        let (column, row) = (column as usize, row as usize);
        (column < self.width && row < self.height).then(|| row * self.width + column)
    }

    fn fill_triangle(&mut self, v0: Point2<f64>, v1: Point2<f64>, v2: Point2<f64>, color: Rgb) -> bool {
        // Bounding box in cells
        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as usize;
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil().max(0.0) as usize).min(self.width);
        let min_y = (v0.y.min(v1.y).min(v2.y) / CELL_ASPECT).floor().max(0.0) as usize;
        let max_y = ((v0.y.max(v1.y).max(v2.y) / CELL_ASPECT).ceil().max(0.0) as usize).min(self.height);

        let mut painted = false;
        for row in min_y..max_y {
            for column in min_x..max_x {
                let p = Point2::new(column as f64 + 0.5, (row as f64 + 0.5) * CELL_ASPECT);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.cells[row * self.width + column] = Cell::Filled(color);
                        painted = true;
                    }
                }
            }
        }
        painted
    }

    fn plot(&mut self, p: &Point2<f64>, color: Rgb) {
        if let Some(i) = self.cell_at(p) {
            self.cells[i] = Cell::Filled(color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                match *cell {
                    Cell::Empty => {
                        writer.queue(ResetColor)?;
                        writer.queue(Print(' '))?;
                    }
                    Cell::Filled(color) => {
                        writer.queue(SetBackgroundColor(to_terminal(color)))?;
                        writer.queue(Print(' '))?;
                    }
                    Cell::Glyph(c, color) => {
                        writer.queue(ResetColor)?;
                        writer.queue(SetForegroundColor(to_terminal(color)))?;
                        writer.queue(Print(c))?;
                    }
                }
            }
            writer.queue(ResetColor)?;
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_terminal(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl DrawSurface for CellCanvas {
    type Error = Infallible;

    fn clear(&mut self, _width: f64, _height: f64) -> Result<(), Infallible> {
        self.cells.fill(Cell::Empty);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), Infallible> {
        self.offset += Vector2::new(dx, dy);
        Ok(())
    }

    fn reset_transform(&mut self) -> Result<(), Infallible> {
        self.offset = Vector2::zeros();
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point2<f64>) {
        self.path.push(p + self.offset);
    }

    fn line_to(&mut self, p: Point2<f64>) {
        self.path.push(p + self.offset);
    }

    fn close_path(&mut self) {}

    fn fill(&mut self, color: Rgb) -> Result<(), Infallible> {
        let path = std::mem::take(&mut self.path);
        let mut painted = false;
        if let Some((&first, rest)) = path.split_first() {
            for pair in rest.windows(2) {
                painted |= self.fill_triangle(first, pair[0], pair[1], color);
            }
            // too small to cover a cell center
            if !painted {
                self.plot(&first, color);
            }
        }
        self.path = path;
        Ok(())
    }

    fn stroke(&mut self, color: Rgb) -> Result<(), Infallible> {
        let path = std::mem::take(&mut self.path);
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = ((b - a).norm() * 2.0).ceil().max(1.0) as usize;
            for i in 0..=steps {
                self.plot(&(a + (b - a) * (i as f64 / steps as f64)), color);
            }
        }
        self.path = path;
        Ok(())
    }

    fn arc(&mut self, center: Point2<f64>, radius: f64) -> Result<(), Infallible> {
        let center = center + self.offset;
        self.path.extend((0..ARC_SEGMENTS).map(|i| {
            let angle = i as f64 / ARC_SEGMENTS as f64 * std::f64::consts::TAU;
            center + Vector2::new(angle.cos(), angle.sin()) * radius
        }));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point2<f64>, color: Rgb) -> Result<(), Infallible> {
        let at = at + self.offset;
        for (i, c) in text.chars().enumerate() {
            if let Some(cell) = self.cell_at(&(at + Vector2::new(i as f64, 0.0))) {
                self.cells[cell] = Cell::Glyph(c, color);
            }
        }
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Point2<f64>,
    v1: Point2<f64>,
    v2: Point2<f64>,
    p: Point2<f64>,
) -> Option<(f64, f64, f64)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-12 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
