use crate::tui::app::Mode;
use crate::tui::keymap::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn translate_default(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match mode {
        Mode::Normal => match key.code {
            KeyCode::Up if ctrl => Some(Action::CopyMove(0, -1)),
            KeyCode::Down if ctrl => Some(Action::CopyMove(0, 1)),
            KeyCode::Left if ctrl => Some(Action::CopyMove(-1, 0)),
            KeyCode::Right if ctrl => Some(Action::CopyMove(1, 0)),

            KeyCode::Up => Some(Action::Move(0, -1)),
            KeyCode::Down => Some(Action::Move(0, 1)),
            KeyCode::Left => Some(Action::Move(-1, 0)),
            KeyCode::Right => Some(Action::Move(1, 0)),
            KeyCode::Char('k') if !ctrl => Some(Action::Move(0, -1)),
            KeyCode::Char('j') if !ctrl => Some(Action::Move(0, 1)),
            KeyCode::Char('h') if !ctrl => Some(Action::Move(-1, 0)),
            KeyCode::Char('l') if !ctrl => Some(Action::Move(1, 0)),

            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::EnterEdit),
            KeyCode::Char('w') if !ctrl => Some(Action::Save),
            KeyCode::Char('f') if !ctrl => Some(Action::ToggleView),
            KeyCode::Char('q') if !ctrl => Some(Action::Quit),
            _ => None,
        },

        Mode::Edit | Mode::SaveAs => match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Char('g') if ctrl => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::CommitEdit),
            _ => None,
        },
    }
}
