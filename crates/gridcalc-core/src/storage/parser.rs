//! Parser for the sheet file format

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use gridcalc_engine::engine::{CellRef, is_blank};
use regex::Regex;
use tracing::warn;

use crate::error::{GridcalcError, Result};

// ASCII digits and blanks only. The text starts after at most one space, the
// separator the writer emits, so leading blanks in a cell survive a save.
static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:space:]]*(?<row>[0-9]+)[[:space:]]+(?<col>[0-9]+) ?(?<text>.*)$")
        .expect("line pattern is valid")
});

/// One cell read from a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub at: CellRef,
    pub text: String,
}

/// The cells of a file plus a problem for every line that was rejected.
#[derive(Debug, Default)]
pub struct Parsed {
    pub entries: Vec<Entry>,
    pub problems: Vec<GridcalcError>,
}

/// Parse a sheet file for a `rows` x `cols` grid.
pub fn parse_sheet(path: &Path, rows: usize, cols: usize) -> Result<Parsed> {
    let content = fs::read_to_string(path)?;
    Ok(parse_sheet_content(&content, rows, cols))
}

/// Parse sheet content from a string.
///
/// Bad lines do not stop the parse: they are reported in
/// [`Parsed::problems`] and the remaining lines are still read.
pub fn parse_sheet_content(content: &str, rows: usize, cols: usize) -> Parsed {
    let mut parsed = Parsed::default();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        match parse_line(line, rows, cols) {
            Ok(entry) => parsed.entries.push(entry),
            Err(message) => {
                warn!(line = line_num, reason = message, "rejected line");
                parsed.problems.push(GridcalcError::Parse {
                    line: line_num,
                    message: message.to_string(),
                });
            }
        }
    }

    parsed
}

fn parse_line(line: &str, rows: usize, cols: usize) -> std::result::Result<Entry, &'static str> {
    const BAD_LINE: &str = "Bad line in file";
    const OUT_OF_RANGE: &str = "Row or column number out of range in file";

    let caps = LINE.captures(line).ok_or(BAD_LINE)?;
    let text = &caps["text"];
    if is_blank(text) {
        return Err(BAD_LINE);
    }

    // Digit runs too long for usize are out of range by definition.
    let row = caps["row"].parse::<usize>().map_err(|_| OUT_OF_RANGE)?;
    let col = caps["col"].parse::<usize>().map_err(|_| OUT_OF_RANGE)?;
    if row >= rows || col >= cols {
        return Err(OUT_OF_RANGE);
    }

    Ok(Entry {
        at: CellRef::new(row, col),
        text: text.to_string(),
    })
}
