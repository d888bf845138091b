use super::Document;
use crate::error::{GridcalcError, Result};
use crate::storage::{Entry, parse_sheet, write_sheet};
use gridcalc_engine::engine::Sheet;
use std::path::{Path, PathBuf};
use tracing::info;

impl Document {
    /// Load from file, replacing the whole sheet.
    ///
    /// Lines that cannot be read are skipped and returned; the first of them
    /// also becomes the status message. An unreadable file leaves the
    /// document untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<GridcalcError>> {
        let parsed = parse_sheet(path, self.rows(), self.cols())?;
        let sheet = build_sheet(&parsed.entries, self.rows(), self.cols())?;

        info!(
            path = %path.display(),
            cells = parsed.entries.len(),
            problems = parsed.problems.len(),
            "sheet loaded"
        );
        if let Some(first) = parsed.problems.first() {
            self.oops(first.to_string());
        }

        self.sheet = sheet;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(parsed.problems)
    }

    /// Save to `path` and make it the current file path.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        write_sheet(path, &self.sheet)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.oops("File written");
        Ok(path.to_path_buf())
    }
}

/// A fresh `rows` x `cols` sheet holding `entries`, invalidated once.
fn build_sheet(entries: &[Entry], rows: usize, cols: usize) -> Result<Sheet> {
    let mut sheet = Sheet::new(rows, cols);
    for entry in entries {
        sheet
            .set_text_batch(entry.at.row, entry.at.col, &entry.text)
            .map_err(|_| GridcalcError::OutOfRange(entry.at))?;
    }
    sheet.invalidate_all();
    Ok(sheet)
}
