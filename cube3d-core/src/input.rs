/// Pointer and viewport state recorded between frames
use nalgebra::{Point2, Vector2};

/// What event callbacks write and the next tick reads. Recording never
/// touches puzzle geometry.
///
/// Positions are given in surface coordinates (origin top-left) and stored
/// relative to the surface center.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    width: f64,
    height: f64,
    position: Point2<f64>,
    down: bool,
    pressed: Option<Point2<f64>>,
    released: bool,
    released_before_press: bool,
    scroll: f64,
    resized: bool,
    recenter: Vector2<f64>,
}

impl InputState {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            position: Point2::origin(),
            down: false,
            pressed: None,
            released: false,
            released_before_press: false,
            scroll: 0.0,
            resized: false,
            recenter: Vector2::zeros(),
        }
    }

    fn centered(&self, x: f64, y: f64) -> Point2<f64> {
        Point2::new(x - self.width / 2.0, y - self.height / 2.0)
    }

    /// Primary button or touch went down at `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        // a release still pending belongs to the previous drag
        if std::mem::take(&mut self.released) {
            self.released_before_press = true;
        }
        self.position = self.centered(x, y);
        self.down = true;
        self.pressed = Some(self.position);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.position = self.centered(x, y);
    }

    pub fn pointer_up(&mut self) {
        if self.down || self.pressed.is_some() {
            self.released = true;
        }
        self.down = false;
    }

    /// Accumulate scroll notches; positive zooms in.
    pub fn scroll(&mut self, notches: f64) {
        self.scroll += notches;
    }

    /// Change the surface size. Every recorded position keeps its place on
    /// screen, so centered coordinates move by the change in center.
    pub fn resize(&mut self, width: f64, height: f64) {
        let shift = Vector2::new(self.width - width, self.height - height) / 2.0;
        self.width = width;
        self.height = height;
        self.position += shift;
        if let Some(press) = &mut self.pressed {
            *press += shift;
        }
        self.recenter += shift;
        self.resized = true;
    }

    /// Pointer position relative to the surface center.
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn take_press(&mut self) -> Option<Point2<f64>> {
        self.pressed.take()
    }

    pub fn take_release(&mut self) -> bool {
        std::mem::take(&mut self.released)
    }

    /// Whether a release was recorded ahead of the pending press.
    pub fn take_release_before_press(&mut self) -> bool {
        std::mem::take(&mut self.released_before_press)
    }

    pub fn take_scroll(&mut self) -> f64 {
        std::mem::take(&mut self.scroll)
    }

    /// How far centered coordinates moved through resizes since the last call.
    pub fn take_recenter(&mut self) -> Vector2<f64> {
        std::mem::take(&mut self.recenter)
    }

    /// The new surface size, if it changed since the last call.
    pub fn take_resize(&mut self) -> Option<(f64, f64)> {
        std::mem::take(&mut self.resized).then_some((self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_centered() {
        let mut input = InputState::new(200.0, 100.0);
        input.pointer_down(150.0, 25.0);
        assert_eq!(input.position(), Point2::new(50.0, -25.0));
        assert!(input.is_down());
        assert_eq!(input.take_press(), Some(Point2::new(50.0, -25.0)));
        assert_eq!(input.take_press(), None);
    }

    #[test]
    fn test_release_is_edge_triggered() {
        let mut input = InputState::new(10.0, 10.0);
        input.pointer_up();
        assert!(!input.take_release());

        input.pointer_down(1.0, 1.0);
        input.pointer_up();
        assert!(!input.is_down());
        assert!(input.take_release());
        assert!(!input.take_release());
    }

    #[test]
    fn test_scroll_and_resize() {
        let mut input = InputState::new(100.0, 100.0);
        input.scroll(1.0);
        input.scroll(2.0);
        assert_eq!(input.take_scroll(), 3.0);
        assert_eq!(input.take_scroll(), 0.0);

        input.pointer_move(60.0, 50.0);
        input.resize(200.0, 100.0);
        assert_eq!(input.take_resize(), Some((200.0, 100.0)));
        assert_eq!(input.take_resize(), None);
        assert_eq!(input.position(), Point2::new(-40.0, 0.0));
        assert_eq!(input.take_recenter(), Vector2::new(-50.0, 0.0));
        assert_eq!(input.take_recenter(), Vector2::zeros());
    }

    #[test]
    fn test_resize_moves_pending_press() {
        let mut input = InputState::new(100.0, 100.0);
        input.pointer_down(70.0, 40.0);
        input.resize(300.0, 100.0);
        assert_eq!(input.take_press(), Some(Point2::new(-80.0, -10.0)));
    }

    #[test]
    fn test_release_then_press_keeps_order() {
        let mut input = InputState::new(10.0, 10.0);
        input.pointer_down(1.0, 1.0);
        input.take_press();
        input.pointer_up();
        input.pointer_down(2.0, 2.0);
        assert!(input.is_down());
        assert!(input.take_release_before_press());
        assert!(!input.take_release());
        assert!(input.take_press().is_some());
    }
}
