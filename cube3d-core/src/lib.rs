/// cube3d Core Library - Geometry, rendering and interaction for a 3×3×3 puzzle
///
/// This library holds everything that does not depend on a particular drawing
/// surface: quaternion math, the puzzle model, projection, painter's-algorithm
/// rendering, picking and the pointer gesture state machine.

pub mod color;
pub mod config;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod math;
pub mod picking;
pub mod projection;
pub mod puzzle;
pub mod render;
pub mod session;
pub mod slice;
pub mod solid;

// Re-export commonly used types
pub use color::{FaceColors, Rgb};
pub use config::{ConfigError, RenderConfig};
pub use geometry::{Face, Mesh, SolidId};
pub use gesture::{Cursor, Gesture, GestureController};
pub use input::InputState;
pub use picking::Pick;
pub use projection::{Camera, ProjectionMode};
pub use puzzle::{Axis, Puzzle};
pub use render::{DrawSurface, Renderer};
pub use session::Session;
pub use slice::SliceTurn;
pub use solid::Solid;
