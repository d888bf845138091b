//! Cell coordinates.
//!
//! Cells are addressed by zero-based `(row, col)` pairs, the same way
//! formulas address them with `row @ col` and the save format writes them.

use std::fmt;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Move by `(drow, dcol)`, clamped to a `rows` x `cols` grid.
    pub fn offset_clamped(self, drow: isize, dcol: isize, rows: usize, cols: usize) -> CellRef {
        let clamp = |at: usize, delta: isize, len: usize| {
            at.saturating_add_signed(delta).min(len.saturating_sub(1))
        };
        CellRef::new(clamp(self.row, drow, rows), clamp(self.col, dcol, cols))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.row, self.col)
    }
}
