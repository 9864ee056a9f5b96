/// cube3d Terminal Demo - Interactive 3×3×3 puzzle
///
/// Renders the puzzle as colored terminal cells. Needs a terminal with mouse
/// reporting and true color.
/// Controls:
///   - Drag a face: turn its slice
///   - Drag empty space: rotate the puzzle
///   - Wheel / +/-: Zoom
///   - O: Toggle perspective/orthographic
///   - D: Toggle debug overlay
///   - R: Reset
///   - Q/ESC: Quit
///
/// Logging goes to stderr and is controlled by `RUST_LOG`; redirect it when
/// enabling, e.g. `RUST_LOG=debug cube3d-terminal 2>cube3d.log`.

use std::io;
use cube3d_core::Puzzle;
use cube3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::builder().init();

    println!("cube3d Terminal Renderer - Loading...");
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::new(Puzzle::default())?;
    app.run()?;

    println!("Thank you for using cube3d Terminal Renderer!");
    Ok(())
}
