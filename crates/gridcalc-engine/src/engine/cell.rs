//! Cell data structures for the spreadsheet grid.
//!
//! - [`Status`] - Where a cell is in its evaluation lifecycle
//! - [`Cell`] - Raw text plus the cached outcome of evaluating it
//! - [`is_formula`] / [`find_formula`] - Formula detection (`=` prefix)

use super::ErrorKind;

/// Characters skipped before looking for the `=` prefix, and between tokens.
pub(crate) const BLANKS: [char; 6] = [' ', '\t', '\r', '\n', '\x0c', '\x0b'];

/// Evaluation state of a single cell.
///
/// `Stale` cells are recomputed on demand. `Computing` is only ever seen
/// while a recompute of that cell is on the stack; observing it from a
/// reference means the reference closes a cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Status {
    Stale,
    Computing,
    Ok(f64),
    Err(ErrorKind),
    NoFormula,
}

impl Status {
    /// The cached value, if the last evaluation succeeded.
    pub fn value(&self) -> Option<f64> {
        match self {
            Status::Ok(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this status is a settled evaluation outcome.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Stale | Status::Computing)
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) text: String,
    pub(crate) status: Status,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            text: String::new(),
            status: Status::Stale,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::new_empty()
    }
}

/// Whether `text` is a formula: its first non-blank character is `=`.
pub fn is_formula(text: &str) -> bool {
    find_formula(text).is_some()
}

/// Return the formula body (everything after the leading `=`), if any.
pub fn find_formula(text: &str) -> Option<&str> {
    text.trim_start_matches(BLANKS).strip_prefix('=')
}

/// Whether `text` has nothing but blanks in it.
pub fn is_blank(text: &str) -> bool {
    text.trim_start_matches(BLANKS).is_empty()
}
