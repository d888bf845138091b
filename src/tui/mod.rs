//! Terminal front end: ratatui renderer, crossterm input loop, line editor.

mod actions;
mod app;
mod input;
mod keymap;
mod ui;

pub use app::App;
pub use keymap::build_keymap;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Take over the terminal and run the app until the user quits.
///
/// The terminal is restored even when the loop fails.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .and_then(|mut terminal| {
            let result = input::run_app(&mut terminal, app);
            let _ = terminal.show_cursor();
            result
        });

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    result
}
