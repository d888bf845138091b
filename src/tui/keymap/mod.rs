//! Keymap translation layer.
//!
//! This keeps key handling separate from app behavior. Built-in bindings
//! follow the classic layout (arrows/hjkl, space to edit); the `[keys]`
//! table of the config adds or overrides normal-mode bindings.

mod defaults;
mod parse;
mod types;

pub use parse::build_keymap;
pub use types::{Action, Binding, KeyCombo, Keymap};

use crate::tui::app::Mode;
use crossterm::event::KeyEvent;

/// Translate a key event to an action based on the current keymap and mode.
///
/// Returns `None` if the key has no binding in the current context.
pub fn translate(keymap: &Keymap, mode: Mode, key: KeyEvent) -> Option<Action> {
    keymap
        .translate_override(mode, key)
        .or_else(|| defaults::translate_default(mode, key))
}
