/// cube3d Web - Canvas 2D frontend compiled to WASM
///
/// The page owns the `<canvas>`, forwards pointer, wheel and resize events to
/// [`WebPuzzle`] and calls [`WebPuzzle::frame`] from `requestAnimationFrame`.

use cube3d_core::{Cursor, DrawSurface, ProjectionMode, Puzzle, RenderConfig, Rgb, Session};
use nalgebra::Point2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// `CanvasRenderingContext2d` as a drawing surface.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }
}

impl DrawSurface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.context.translate(dx, dy)
    }

    fn reset_transform(&mut self) -> Result<(), JsValue> {
        self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, p: Point2<f64>) {
        self.context.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point2<f64>) {
        self.context.line_to(p.x, p.y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn fill(&mut self, color: Rgb) -> Result<(), JsValue> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill();
        Ok(())
    }

    fn stroke(&mut self, color: Rgb) -> Result<(), JsValue> {
        self.context.set_stroke_style_str(&color.to_css());
        self.context.stroke();
        Ok(())
    }

    fn arc(&mut self, center: Point2<f64>, radius: f64) -> Result<(), JsValue> {
        self.context
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
    }

    fn fill_text(&mut self, text: &str, at: Point2<f64>, color: Rgb) -> Result<(), JsValue> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_text(text, at.x, at.y)
    }
}

fn css_cursor(cursor: Cursor) -> &'static str {
    match cursor {
        Cursor::Default => "default",
        Cursor::Grab => "grab",
        Cursor::Grabbing => "grabbing",
    }
}

#[wasm_bindgen]
pub struct WebPuzzle {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    session: Session,
}

#[wasm_bindgen]
impl WebPuzzle {
    /// Bind to the canvas with id `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebPuzzle, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let (width, height) = (canvas.width() as f64, canvas.height() as f64);
        let session = Session::new(Puzzle::default(), RenderConfig::default(), width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("bound puzzle to #{canvas_id} ({width}x{height})");

        Ok(WebPuzzle {
            canvas,
            surface: CanvasSurface::new(context),
            session,
        })
    }

    /// Pointer or touch went down, in canvas pixels.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.input_mut().pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.input_mut().pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.session.input_mut().pointer_up();
    }

    /// Wheel input in notches; positive zooms in.
    pub fn wheel(&mut self, notches: f64) {
        self.session.input_mut().scroll(notches);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.session.input_mut().resize(width as f64, height as f64);
    }

    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.session.config_mut().projection = if orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) -> Result<(), JsValue> {
        self.session
            .config_mut()
            .set_sensitivity(sensitivity)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.session.config_mut().debug = debug;
    }

    pub fn reset(&mut self) {
        self.session.puzzle_mut().reset();
    }

    /// Apply recorded input and redraw.
    pub fn frame(&mut self) -> Result<(), JsValue> {
        if let Some(turn) = self.session.frame(&mut self.surface)? {
            log::info!("turned {} solids about {:?}", turn.affected.len(), turn.axis);
        }
        self.canvas
            .style()
            .set_property("cursor", css_cursor(self.session.cursor()))
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_cursor() {
        assert_eq!(css_cursor(Cursor::Default), "default");
        assert_eq!(css_cursor(Cursor::Grab), "grab");
        assert_eq!(css_cursor(Cursor::Grabbing), "grabbing");
    }
}
