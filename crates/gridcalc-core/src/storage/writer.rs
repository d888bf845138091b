//! Writer for the sheet file format

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use gridcalc_engine::engine::Sheet;
use tracing::info;

use crate::error::Result;

/// Write a sheet to a file
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
    let content = write_sheet_content(sheet);
    fs::write(path, content)?;
    info!(path = %path.display(), "sheet written");
    Ok(())
}

/// Write a sheet to a string, one non-blank cell per line in row-major order.
pub fn write_sheet_content(sheet: &Sheet) -> String {
    let mut out = String::new();
    for (at, text) in sheet.non_blank() {
        let _ = writeln!(out, "{} {} {}", at.row, at.col, text);
    }
    out
}
