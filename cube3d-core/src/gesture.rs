/// Pointer gestures: trackball rotation of the whole puzzle or a slice turn
use nalgebra::{Point2, Vector2, Vector3};

use crate::config::RenderConfig;
use crate::input::InputState;
use crate::math::axis_angle;
use crate::picking::{pick, Pick};
use crate::projection::Camera;
use crate::puzzle::Puzzle;
use crate::slice::{turn_from_drag, SliceTurn};

/// Per-drag state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Dragging empty space rotates the whole puzzle.
    Rotating { last: Point2<f64> },
    /// A face was picked; waiting for the drag to pass the move threshold.
    SliceArmed { origin: Point2<f64>, pick: Pick },
    /// The slice turn for this drag has been applied.
    SliceMoved,
}

/// Pointer affordance the frontend may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    gesture: Gesture,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn cursor(&self) -> Cursor {
        match self.gesture {
            Gesture::Idle => Cursor::Default,
            Gesture::SliceArmed { .. } => Cursor::Grab,
            Gesture::Rotating { .. } | Gesture::SliceMoved => Cursor::Grabbing,
        }
    }

    /// Consume recorded input and apply it to the puzzle. Returns the slice
    /// turn if one was committed during this tick.
    pub fn tick(
        &mut self,
        input: &mut InputState,
        puzzle: &mut Puzzle,
        config: &RenderConfig,
    ) -> Option<SliceTurn> {
        self.recenter(input.take_recenter());
        if input.take_release_before_press() {
            self.end();
        }
        if let Some(press) = input.take_press() {
            self.begin(press, puzzle, config);
        }

        let position = input.position();
        let mut committed = None;
        self.gesture = match std::mem::take(&mut self.gesture) {
            Gesture::Rotating { last } => {
                rotate_whole(puzzle, config, &last, &position);
                Gesture::Rotating { last: position }
            }
            Gesture::SliceArmed { origin, pick } => {
                let drag = position - origin;
                if drag.norm() > config.move_threshold {
                    committed = Some(turn_from_drag(puzzle, &pick, &drag));
                    Gesture::SliceMoved
                } else {
                    Gesture::SliceArmed { origin, pick }
                }
            }
            other => other,
        };

        if input.take_release() {
            self.end();
        }
        committed
    }

    fn end(&mut self) {
        log::debug!("gesture ended");
        self.gesture = Gesture::Idle;
    }

    /// Keep stored positions in step with a moved surface center.
    fn recenter(&mut self, shift: Vector2<f64>) {
        match &mut self.gesture {
            Gesture::Rotating { last } => *last += shift,
            Gesture::SliceArmed { origin, .. } => *origin += shift,
            Gesture::Idle | Gesture::SliceMoved => {}
        }
    }

    fn begin(&mut self, press: Point2<f64>, puzzle: &Puzzle, config: &RenderConfig) {
        let mesh = puzzle.compute_mesh();
        self.gesture = match pick(&mesh, &Camera::from_config(config), &press) {
            Some(pick) => {
                log::debug!("picked face {} of {:?}", pick.face, pick.solid);
                Gesture::SliceArmed { origin: press, pick }
            }
            None => {
                log::debug!("no face under pointer, rotating puzzle");
                Gesture::Rotating { last: press }
            }
        };
    }
}

/// Trackball step: vertical motion turns about the screen x axis, horizontal
/// motion about the screen y axis.
fn rotate_whole(puzzle: &mut Puzzle, config: &RenderConfig, last: &Point2<f64>, now: &Point2<f64>) {
    let delta = now - last;
    if delta.x == 0.0 && delta.y == 0.0 {
        return;
    }
    log::trace!("trackball delta {}, {}", delta.x, delta.y);

    let about_x = axis_angle(&Vector3::x(), config.drag_angle(delta.y));
    let about_y = axis_angle(&Vector3::y(), -config.drag_angle(delta.x));
    puzzle.rotate(&about_x, config.renormalize);
    puzzle.rotate(&about_y, config.renormalize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SolidId;
    use crate::puzzle::Axis;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Quaternion};

    const WIDTH: f64 = 800.0;
    const HEIGHT: f64 = 600.0;

    fn setup() -> (GestureController, InputState, Puzzle, RenderConfig) {
        (
            GestureController::new(),
            InputState::new(WIDTH, HEIGHT),
            Puzzle::default(),
            RenderConfig::default(),
        )
    }

    /// Surface coordinates of a centered point.
    fn screen(x: f64, y: f64) -> (f64, f64) {
        (x + WIDTH / 2.0, y + HEIGHT / 2.0)
    }

    #[test]
    fn test_empty_space_rotates_puzzle() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let (x, y) = screen(350.0, 250.0);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);
        assert!(matches!(controller.gesture(), Gesture::Rotating { .. }));
        assert_eq!(controller.cursor(), Cursor::Grabbing);

        // drag right: the front of the puzzle swings toward +x
        input.pointer_move(x + 10.0, y);
        controller.tick(&mut input, &mut puzzle, &config);
        let front = puzzle.to_world(&Point3::new(0.0, 0.0, 34.0));
        assert!(front.x > 0.0);
        assert_relative_eq!(puzzle.orientation().norm(), 1.0, epsilon = 1e-12);

        // no movement, no change
        let orientation = puzzle.orientation();
        controller.tick(&mut input, &mut puzzle, &config);
        assert_eq!(puzzle.orientation(), orientation);

        input.pointer_up();
        controller.tick(&mut input, &mut puzzle, &config);
        assert_eq!(controller.gesture(), &Gesture::Idle);
        assert_eq!(controller.cursor(), Cursor::Default);
    }

    #[test]
    fn test_vertical_drag_tilts_about_x() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let (x, y) = screen(-350.0, 250.0);
        input.pointer_down(x, y);
        input.pointer_move(x, y + 20.0);
        controller.tick(&mut input, &mut puzzle, &config);

        let q = puzzle.orientation();
        let expected = axis_angle(&Vector3::x(), config.drag_angle(20.0));
        assert_relative_eq!(q, expected, epsilon = 1e-12);
        // dragging down brings the front toward +y
        assert!(puzzle.to_world(&Point3::new(0.0, 0.0, 34.0)).y > 0.0);
    }

    #[test]
    fn test_each_pixel_applied_once() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let (x, y) = screen(-350.0, -250.0);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);
        input.pointer_move(x + 5.0, y);
        controller.tick(&mut input, &mut puzzle, &config);
        input.pointer_move(x + 10.0, y);
        controller.tick(&mut input, &mut puzzle, &config);

        let expected = axis_angle(&Vector3::y(), -config.drag_angle(10.0));
        assert_relative_eq!(puzzle.orientation(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_drift_kept_without_renormalize() {
        let (mut controller, mut input, mut puzzle, mut config) = setup();
        config.renormalize = false;
        puzzle.set_orientation(Quaternion::new(1.01, 0.0, 0.0, 0.0));
        let (x, y) = screen(-350.0, -250.0);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);
        input.pointer_move(x + 5.0, y + 5.0);
        controller.tick(&mut input, &mut puzzle, &config);
        assert!((puzzle.orientation().norm() - 1.01).abs() < 1e-9);
    }

    #[test]
    fn test_small_drag_on_face_does_nothing() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let before = puzzle.clone();
        let (x, y) = screen(0.0, 0.0);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);
        assert!(matches!(controller.gesture(), Gesture::SliceArmed { .. }));
        assert_eq!(controller.cursor(), Cursor::Grab);

        input.pointer_move(x + 3.0, y);
        assert_eq!(controller.tick(&mut input, &mut puzzle, &config), None);
        input.pointer_up();
        controller.tick(&mut input, &mut puzzle, &config);

        assert_eq!(controller.gesture(), &Gesture::Idle);
        assert_eq!(puzzle.solids(), before.solids());
        assert_eq!(puzzle.orientation(), before.orientation());
    }

    #[test]
    fn test_face_drag_turns_slice_once() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        // the front face of the top-left-front solid projects around (-157.5, -157.5)
        let (x, y) = screen(-157.5, -157.5);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);
        match controller.gesture() {
            Gesture::SliceArmed { pick, .. } => assert_eq!(pick.solid, SolidId(0)),
            other => panic!("expected an armed slice, got {other:?}"),
        }

        input.pointer_move(x + 30.0, y);
        let turn = controller
            .tick(&mut input, &mut puzzle, &config)
            .expect("drag passed the threshold");
        assert_eq!(turn.affected.len(), 9);
        assert_eq!(turn.axis, Some(Axis::X));
        assert_eq!(controller.gesture(), &Gesture::SliceMoved);

        let expected = axis_angle(&Vector3::x(), std::f64::consts::FRAC_PI_2);
        for id in &turn.affected {
            assert_relative_eq!(puzzle.solid(*id).orientation, expected, epsilon = 1e-12);
        }

        // further motion in the same drag turns nothing more
        let after = puzzle.clone();
        input.pointer_move(x + 90.0, y + 40.0);
        assert_eq!(controller.tick(&mut input, &mut puzzle, &config), None);
        assert_eq!(puzzle.solids(), after.solids());
        assert_eq!(puzzle.orientation(), after.orientation());

        input.pointer_up();
        controller.tick(&mut input, &mut puzzle, &config);
        assert_eq!(controller.gesture(), &Gesture::Idle);
    }

    #[test]
    fn test_resize_during_rotation_is_not_motion() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let (x, y) = screen(-350.0, 250.0);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);

        input.resize(WIDTH + 200.0, HEIGHT);
        controller.tick(&mut input, &mut puzzle, &config);
        assert_eq!(puzzle.orientation(), Quaternion::identity());

        input.pointer_move(x + 10.0, y);
        controller.tick(&mut input, &mut puzzle, &config);
        let expected = axis_angle(&Vector3::y(), -config.drag_angle(10.0));
        assert_relative_eq!(puzzle.orientation(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_resize_does_not_arm_turn() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let before = puzzle.clone();
        let (x, y) = screen(-157.5, -157.5);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);

        input.resize(WIDTH + 200.0, HEIGHT + 100.0);
        assert_eq!(controller.tick(&mut input, &mut puzzle, &config), None);
        assert!(matches!(controller.gesture(), Gesture::SliceArmed { .. }));
        assert_eq!(puzzle.solids(), before.solids());
    }

    #[test]
    fn test_press_after_release_in_same_tick() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let (x, y) = screen(-350.0, 250.0);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);

        input.pointer_up();
        let (x, y) = screen(-157.5, -157.5);
        input.pointer_down(x, y);
        controller.tick(&mut input, &mut puzzle, &config);
        assert!(input.is_down());
        assert!(matches!(controller.gesture(), Gesture::SliceArmed { .. }));

        input.pointer_move(x + 30.0, y);
        let turn = controller.tick(&mut input, &mut puzzle, &config);
        assert_eq!(turn.map(|turn| turn.affected.len()), Some(9));
    }

    #[test]
    fn test_click_within_one_tick() {
        let (mut controller, mut input, mut puzzle, config) = setup();
        let (x, y) = screen(0.0, 0.0);
        input.pointer_down(x, y);
        input.pointer_up();
        assert_eq!(controller.tick(&mut input, &mut puzzle, &config), None);
        assert_eq!(controller.gesture(), &Gesture::Idle);
    }
}
