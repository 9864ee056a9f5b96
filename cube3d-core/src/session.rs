/// One interactive puzzle view: state, input and the per-frame driver
use crate::config::{ConfigError, RenderConfig};
use crate::gesture::{Cursor, GestureController};
use crate::input::InputState;
use crate::puzzle::Puzzle;
use crate::render::{DrawSurface, Renderer};
use crate::slice::SliceTurn;

/// Owns everything a frontend needs to drive a puzzle. Event callbacks write
/// into [`Session::input_mut`]; [`Session::tick`] is the only place puzzle
/// state changes.
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    config: RenderConfig,
    input: InputState,
    controller: GestureController,
    renderer: Renderer,
}

impl Session {
    pub fn new(
        puzzle: Puzzle,
        config: RenderConfig,
        width: f64,
        height: f64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            puzzle,
            config,
            input: InputState::new(width, height),
            controller: GestureController::new(),
            renderer: Renderer::new(width, height),
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn puzzle_mut(&mut self) -> &mut Puzzle {
        &mut self.puzzle
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn cursor(&self) -> Cursor {
        self.controller.cursor()
    }

    /// Apply recorded input: resize, zoom, then the gesture.
    pub fn tick(&mut self) -> Option<SliceTurn> {
        if let Some((width, height)) = self.input.take_resize() {
            log::debug!("surface resized to {width}x{height}");
            self.renderer.resize(width, height);
        }

        let notches = self.input.take_scroll();
        if notches != 0.0 {
            self.config.scroll(notches);
        }

        self.controller
            .tick(&mut self.input, &mut self.puzzle, &self.config)
    }

    pub fn render<S: DrawSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let mesh = self.puzzle.compute_mesh();
        self.renderer.render(surface, &mesh, &self.config)
    }

    /// Tick, then draw.
    pub fn frame<S: DrawSurface>(&mut self, surface: &mut S) -> Result<Option<SliceTurn>, S::Error> {
        let turn = self.tick();
        self.render(surface)?;
        Ok(turn)
    }
}
