use super::{Action, Binding, KeyCombo, Keymap};
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::BTreeMap;

const MAX_BINDINGS: usize = 512;

/// Build the keymap from the config's `[keys]` table.
///
/// Invalid entries are skipped with a warning; the rest still apply.
pub fn build_keymap(raw: &BTreeMap<String, String>) -> (Keymap, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut keymap = Keymap::default();

    if raw.len() > MAX_BINDINGS {
        warnings.push(format!(
            "Too many key bindings: {} (max {})",
            raw.len(),
            MAX_BINDINGS
        ));
        return (keymap, warnings);
    }

    for (combo_str, action_str) in raw {
        match (parse_key_combo(combo_str), action_from_str(action_str)) {
            (Ok(combo), Some(action)) => {
                if keymap.overrides.iter().any(|binding| binding.combo == combo) {
                    warnings.push(format!("Duplicate key '{}' in [keys]", combo.display()));
                    continue;
                }
                keymap.overrides.push(Binding { combo, action });
            }
            (Ok(_), None) => warnings.push(format!("Invalid action '{}' in [keys]", action_str)),
            (Err(err), _) => {
                warnings.push(format!("Invalid key '{}' in [keys]: {}", combo_str, err))
            }
        }
    }
    (keymap, warnings)
}

fn parse_key_combo(input: &str) -> Result<KeyCombo, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCombo {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::empty(),
        });
    }

    let (mods, key_part) = if !trimmed.contains('-') {
        (KeyModifiers::empty(), trimmed)
    } else if let Some(mod_str) = trimmed.strip_suffix('-') {
        let mod_str = mod_str.trim_end_matches('-');
        if mod_str.is_empty() {
            return Err("missing modifier before '-'".to_string());
        }
        (parse_modifiers(mod_str)?, "-")
    } else {
        let mut split = trimmed.rsplitn(2, '-');
        let key_part = split.next().ok_or_else(|| "empty key".to_string())?;
        let mod_str = split.next().unwrap_or_default();
        (parse_modifiers(mod_str)?, key_part)
    };

    Ok(KeyCombo {
        code: parse_key_code(key_part)?,
        modifiers: mods,
    })
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers, String> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('-') {
        let raw = part.trim();
        if raw.is_empty() {
            return Err("empty modifier segment".to_string());
        }
        let flag = match raw.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "m" | "alt" | "meta" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            _ => return Err(format!("unknown modifier '{}'", part)),
        };
        if modifiers.contains(flag) {
            return Err(format!("duplicate modifier '{}'", raw));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn parse_key_code(input: &str) -> Result<KeyCode, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("empty key".to_string());
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCode::Char(ch));
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "enter" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "backspace" => Ok(KeyCode::Backspace),
        "tab" => Ok(KeyCode::Tab),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        "equal" => Ok(KeyCode::Char('=')),
        _ => Err(format!("unknown key '{}'", input)),
    }
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_none() {
        Some(ch)
    } else {
        None
    }
}

fn action_from_str(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "move_left" => Some(Action::Move(-1, 0)),
        "move_right" => Some(Action::Move(1, 0)),
        "move_up" => Some(Action::Move(0, -1)),
        "move_down" => Some(Action::Move(0, 1)),
        "copy_left" => Some(Action::CopyMove(-1, 0)),
        "copy_right" => Some(Action::CopyMove(1, 0)),
        "copy_up" => Some(Action::CopyMove(0, -1)),
        "copy_down" => Some(Action::CopyMove(0, 1)),
        "edit" => Some(Action::EnterEdit),
        "save" => Some(Action::Save),
        "toggle_view" => Some(Action::ToggleView),
        "quit" => Some(Action::Quit),
        _ => None,
    }
}
