use crate::tui::app::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Normal-mode bindings from the user config, consulted before the
/// built-in ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keymap {
    pub overrides: Vec<Binding>,
}

impl Keymap {
    pub fn status_hint(&self) -> &'static str {
        "arrows/hjkl:move  C-arrow:copy  SPC:edit  w:write  f:formulas  q:quit"
    }

    pub(crate) fn translate_override(&self, mode: Mode, key: KeyEvent) -> Option<Action> {
        if mode != Mode::Normal {
            return None;
        }
        self.overrides
            .iter()
            .filter(|binding| !binding.combo.modifiers.is_empty())
            .find(|binding| binding.combo.matches(key))
            .or_else(|| {
                self.overrides
                    .iter()
                    .filter(|binding| binding.combo.modifiers.is_empty())
                    .find(|binding| binding.combo.matches(key))
            })
            .map(|binding| binding.action)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub combo: KeyCombo,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    fn matches(&self, key: KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        if self.modifiers.is_empty() {
            return true;
        }
        key.modifiers.contains(self.modifiers)
    }

    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("C");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("M");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("S");
        }
        let key = match self.code {
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => "Unknown".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}-{}", parts.join("-"), key)
        }
    }
}

/// Actions that can be triggered by key presses.
///
/// The keymap translates key events into actions, which are then applied to
/// the application state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Abort the line editor, leaving the sheet untouched.
    Cancel,
    /// Commit the line editor's text.
    CommitEdit,
    /// Edit the focus cell's text.
    EnterEdit,
    /// Prompt for a file name and write the sheet.
    Save,
    /// Switch between the values and formulas views.
    ToggleView,
    Quit,

    /// Move cursor by (dx, dy).
    Move(i32, i32),
    /// Copy the focus cell's text to the neighbour at (dx, dy) and move there.
    CopyMove(i32, i32),
}
