/// Terminal frontend: drives a puzzle session with the mouse and draws it as colored cells
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use cube3d_core::{ConfigError, Puzzle, RenderConfig, Session};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod canvas;

pub use canvas::CellCanvas;

/// Fraction of the smaller surface dimension used as the initial zoom.
const FIT_ZOOM: f64 = 0.4;

/// Render parameters scaled for a surface measured in cells.
pub fn terminal_config(width: f64, height: f64) -> Result<RenderConfig, ConfigError> {
    let mut config = RenderConfig::new(width.min(height) * FIT_ZOOM, 4.0, 256.0)?;
    config.move_threshold = 2.0;
    config.set_sensitivity(1.0)?;
    Ok(config)
}

fn config_error(e: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

/// Main application struct for terminal puzzle rendering
pub struct TerminalApp {
    session: Session,
    canvas: CellCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(puzzle: Puzzle) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let canvas = CellCanvas::new(columns as usize, rows as usize);
        let (width, height) = canvas.surface_size();
        let config = terminal_config(width, height).map_err(config_error)?;
        let session = Session::new(puzzle, config, width, height).map_err(config_error)?;

        Ok(Self {
            session,
            canvas,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Record input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update and render
            if let Some(turn) = self.session.tick() {
                log::info!("turned {} solids about {:?}", turn.affected.len(), turn.axis);
            }
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                self.canvas.resize(columns as usize, rows as usize);
                let (width, height) = self.canvas.surface_size();
                self.session.input_mut().resize(width, height);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind != KeyEventKind::Press {
            return;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('o') => {
                self.session.config_mut().toggle_projection();
            }
            KeyCode::Char('d') => {
                let config = self.session.config_mut();
                config.debug = !config.debug;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.input_mut().scroll(1.0);
            }
            KeyCode::Char('-') => {
                self.session.input_mut().scroll(-1.0);
            }
            KeyCode::Char('r') => {
                self.session.puzzle_mut().reset();
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        let (x, y) = CellCanvas::cell_center(column, row);
        let input = self.session.input_mut();
        match kind {
            MouseEventKind::Down(MouseButton::Left) => input.pointer_down(x, y),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                input.pointer_move(x, y)
            }
            MouseEventKind::Up(MouseButton::Left) => input.pointer_up(),
            MouseEventKind::ScrollUp => input.scroll(1.0),
            MouseEventKind::ScrollDown => input.scroll(-1.0),
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        match self.session.render(&mut self.canvas) {
            Ok(()) => {}
            Err(never) => match never {},
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "cube3d | FPS: {:.1} | {:?} | Drag face=Turn Drag space=Rotate Wheel/+/-=Zoom O=Projection D=Debug R=Reset Q=Quit",
                self.fps,
                self.session.config().projection,
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
