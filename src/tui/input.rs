use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use std::io;

use super::actions::{ApplyResult, apply_action, handle_edit_text};
use super::app::{App, Mode};
use super::keymap::translate;
use super::ui;

/// React to one key press. Returns `ApplyResult::Quit` to leave the loop.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> ApplyResult {
    match translate(&app.keymap, app.mode, key) {
        Some(action) => apply_action(app, action),
        None => {
            match app.mode {
                Mode::Normal => app.doc.oops("Unknown key"),
                Mode::Edit | Mode::SaveAs => handle_edit_text(app, key),
            }
            ApplyResult::Continue
        }
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(app, key) == ApplyResult::Quit {
                return Ok(());
            }
        }
    }
}
