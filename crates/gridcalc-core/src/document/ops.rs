use super::Document;
use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::CellRef;

impl Document {
    /// Set the text of a cell. Every cached value is invalidated.
    pub fn set_text(&mut self, at: CellRef, text: &str) -> Result<()> {
        self.sheet
            .set_text(at.row, at.col, text)
            .map_err(|_| GridcalcError::OutOfRange(at))?;
        self.modified = true;
        Ok(())
    }

    /// Copy the text of `from` into `to`.
    pub fn copy_text(&mut self, from: CellRef, to: CellRef) -> Result<()> {
        if !self.sheet.contains(from.row, from.col) {
            return Err(GridcalcError::OutOfRange(from));
        }
        let text = self.text_of(from).to_string();
        self.set_text(to, &text)
    }
}
