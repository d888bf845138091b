//! The cell store and its on-demand recompute.
//!
//! Every edit marks every cell `Stale`. Reading a value recomputes a stale
//! cell, first marking it `Computing` so a reference chain that comes back
//! to it sees the mark and reports a cycle instead of recursing forever.
//! Between two top-level reads nothing is left `Computing`.

use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};

use super::cell::{Cell, Status, find_formula};
use super::eval::{Resolver, evaluate};
use super::{CellRef, ErrorKind};

/// Grid height used when no configuration says otherwise.
pub const DEFAULT_ROWS: usize = 20;
/// Grid width used when no configuration says otherwise.
pub const DEFAULT_COLS: usize = 4;

/// A fixed-size grid of cells.
#[derive(Clone, Debug)]
pub struct Sheet {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    /// First error raised by any recompute since the last `take_first_error`.
    first_error: Option<ErrorKind>,
}

impl Sheet {
    /// Create an empty sheet. Zero dimensions are bumped to one.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Sheet {
            rows,
            cols,
            cells: vec![Cell::new_empty(); rows * cols],
            first_error: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.contains(row, col).then(|| row * self.cols + col)
    }

    fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Replace the text of a cell and invalidate every cached value.
    pub fn set_text(&mut self, row: usize, col: usize, text: &str) -> Result<(), ErrorKind> {
        self.set_text_batch(row, col, text)?;
        self.invalidate_all();
        Ok(())
    }

    /// Replace the text of a cell without invalidating anything.
    ///
    /// Meant for bulk loads: the caller must call [`Sheet::invalidate_all`]
    /// once the batch is done.
    pub fn set_text_batch(&mut self, row: usize, col: usize, text: &str) -> Result<(), ErrorKind> {
        let index = self.index(row, col).ok_or(ErrorKind::OutOfRange)?;
        let cell = &mut self.cells[index];
        if cell.text != text {
            cell.text.clear();
            cell.text.push_str(text);
        }
        Ok(())
    }

    /// Mark every cell `Stale`.
    pub fn invalidate_all(&mut self) {
        debug!(cells = self.cells.len(), "invalidating all cells");
        for cell in &mut self.cells {
            cell.status = Status::Stale;
        }
    }

    /// Raw text of a cell; `None` outside the grid.
    pub fn text_of(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).map(Cell::text)
    }

    /// Current status of a cell, without recomputing it.
    pub fn status_of(&self, row: usize, col: usize) -> Option<Status> {
        self.cell(row, col).map(Cell::status)
    }

    /// Cached value of a cell, without recomputing it.
    pub fn value_of(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).and_then(|cell| cell.status.value())
    }

    /// Value of a cell, recomputing it if it is stale.
    pub fn get_value(&mut self, row: usize, col: usize) -> Result<f64, ErrorKind> {
        let Some(index) = self.index(row, col) else {
            return Err(ErrorKind::OutOfRange);
        };
        match self.cells[index].status {
            Status::Ok(v) => Ok(v),
            Status::Err(kind) => Err(kind),
            Status::NoFormula => Err(ErrorKind::NoFormula),
            Status::Computing => {
                debug!(row, col, "reference cycle");
                Err(ErrorKind::Cycle)
            }
            Status::Stale => self.recompute(index, row, col),
        }
    }

    fn recompute(&mut self, index: usize, row: usize, col: usize) -> Result<f64, ErrorKind> {
        let formula = find_formula(&self.cells[index].text).map(str::to_owned);
        let mut sheet = ComputingGuard::enter(self, index);
        trace!(row, col, "computing");

        let Some(body) = formula else {
            sheet.settle(Status::NoFormula);
            return Err(ErrorKind::NoFormula);
        };

        let result = evaluate(&body, row, col, &mut *sheet);
        match result {
            Ok(v) => sheet.settle(Status::Ok(v)),
            Err(kind) => {
                if sheet.first_error.is_none() && kind != ErrorKind::UpstreamError {
                    sheet.first_error = Some(kind);
                }
                sheet.settle(Status::Err(kind));
            }
        }
        trace!(row, col, ?result, "computed");
        result
    }

    /// Take the first error raised by a recompute since the last call.
    pub fn take_first_error(&mut self) -> Option<ErrorKind> {
        self.first_error.take()
    }

    /// Iterate over every cell whose text is not blank, in row-major order.
    pub fn non_blank(&self) -> impl Iterator<Item = (CellRef, &str)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            (!super::cell::is_blank(&cell.text))
                .then(|| (CellRef::new(i / self.cols, i % self.cols), cell.text()))
        })
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Sheet::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Resolver for Sheet {
    fn in_bounds(&self, row: usize, col: usize) -> bool {
        self.contains(row, col)
    }

    fn resolve(&mut self, row: usize, col: usize) -> Result<f64, ErrorKind> {
        self.get_value(row, col)
    }
}

/// Holds a cell in `Computing` until it is settled.
///
/// If the guard is dropped without being settled (an unwinding panic) the
/// cell goes back to `Stale`, so no `Computing` mark outlives the recompute.
struct ComputingGuard<'a> {
    sheet: &'a mut Sheet,
    index: usize,
    settled: bool,
}

impl<'a> ComputingGuard<'a> {
    fn enter(sheet: &'a mut Sheet, index: usize) -> Self {
        sheet.cells[index].status = Status::Computing;
        ComputingGuard {
            sheet,
            index,
            settled: false,
        }
    }

    fn settle(mut self, status: Status) {
        debug_assert!(status.is_terminal());
        self.sheet.cells[self.index].status = status;
        self.settled = true;
    }
}

impl Deref for ComputingGuard<'_> {
    type Target = Sheet;

    fn deref(&self) -> &Sheet {
        self.sheet
    }
}

impl DerefMut for ComputingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Sheet {
        self.sheet
    }
}

impl Drop for ComputingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.sheet.cells[self.index].status = Status::Stale;
        }
    }
}
