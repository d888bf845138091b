//! What each cell looks like on screen, independent of any terminal library.

use super::Document;
use gridcalc_engine::engine::{CellRef, Status, find_formula, fit_to_width, format_number, is_formula};
use std::fmt::Write as _;

const FORMULAS_MARKER: &str = "(formulas)";

/// Which face of a formula cell is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Formula cells show their computed value or error message.
    #[default]
    Values,
    /// Formula cells show the formula body.
    Formulas,
}

impl View {
    pub fn toggle(self) -> View {
        match self {
            View::Values => View::Formulas,
            View::Formulas => View::Values,
        }
    }
}

/// A cell's text fitted to its column, and whether to style it as an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellDisplay {
    pub text: String,
    pub is_error: bool,
}

/// Column-number header for a grid `cols` wide, aligned with [`row_label`].
pub fn header_line(view: View, cols: usize, width: usize) -> String {
    let mut line = String::from("  ");
    for col in 0..cols {
        let _ = write!(line, " {:>width$}", col, width = width);
    }
    if view == View::Formulas {
        let room = line.len() - line.trim_start().len();
        if room > FORMULAS_MARKER.len() {
            line.replace_range(..FORMULAS_MARKER.len(), FORMULAS_MARKER);
        }
    }
    line
}

/// Row number as shown at the start of each grid line.
pub fn row_label(row: usize) -> String {
    format!("{:>2}", row)
}

impl Document {
    /// The display of one cell, recomputing it if needed.
    pub fn cell_display(&mut self, at: CellRef, view: View, width: usize) -> CellDisplay {
        let (shown, is_error) = if view == View::Values && is_formula(self.text_of(at)) {
            match self.sheet.get_value(at.row, at.col) {
                Ok(v) => (format_number(v), false),
                Err(kind) => (kind.to_string(), true),
            }
        } else {
            let text = self.text_of(at);
            (find_formula(text).unwrap_or(text).to_string(), false)
        };
        CellDisplay {
            text: fit_to_width(&shown, width),
            is_error,
        }
    }

    /// The status line for a frame that has just been drawn.
    ///
    /// Shows the first message raised since the last frame, or else the
    /// error of the focus cell. Pending messages are cleared either way.
    pub fn frame_message(&mut self, focus: CellRef) -> String {
        let status = self.take_status();
        let first_error = self.sheet.take_first_error();
        status
            .or_else(|| first_error.map(|kind| kind.to_string()))
            .or_else(|| match self.sheet.status_of(focus.row, focus.col) {
                Some(Status::Err(kind)) => Some(kind.to_string()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Render the whole grid as plain text, one line per row.
    pub fn render_text(&mut self, view: View, width: usize) -> String {
        let mut out = header_line(view, self.cols(), width);
        out.push('\n');
        for row in 0..self.rows() {
            out.push_str(&row_label(row));
            for col in 0..self.cols() {
                let cell = self.cell_display(CellRef::new(row, col), view, width);
                out.push(' ');
                out.push_str(&cell.text);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(cells: &[(usize, usize, &str)]) -> Document {
        let mut doc = Document::new(20, 4);
        for &(r, c, text) in cells {
            doc.set_text(CellRef::new(r, c), text).unwrap();
        }
        doc
    }

    #[test]
    fn test_values_view() {
        let mut doc = doc_with(&[(0, 0, "= 2 + 3 * 4"), (0, 1, "label"), (0, 2, "= 1 / 0")]);
        let shown = |doc: &mut Document, c| doc.cell_display(CellRef::new(0, c), View::Values, 8);
        assert_eq!(
            shown(&mut doc, 0),
            CellDisplay {
                text: "      14".to_string(),
                is_error: false
            }
        );
        assert_eq!(shown(&mut doc, 1).text, "   label");
        let err = shown(&mut doc, 2);
        assert_eq!(err.text, "Divid...");
        assert!(err.is_error);
    }

    #[test]
    fn test_formulas_view_shows_body() {
        let mut doc = doc_with(&[(0, 0, "  = 2 + 3"), (0, 1, "label")]);
        let at = CellRef::new(0, 0);
        assert_eq!(doc.cell_display(at, View::Formulas, 8).text, "   2 + 3");
        assert_eq!(
            doc.cell_display(CellRef::new(0, 1), View::Formulas, 8).text,
            "   label"
        );
        assert_eq!(doc.sheet.status_of(0, 0), Some(Status::Stale));
    }

    #[test]
    fn test_upstream_error_shows_empty_in_error_style() {
        let mut doc = doc_with(&[(0, 0, "= (1"), (1, 0, "= 0 @ 0")]);
        let shown = doc.cell_display(CellRef::new(1, 0), View::Values, 6);
        assert_eq!(shown.text, "      ");
        assert!(shown.is_error);
    }

    #[test]
    fn test_frame_message_prefers_pending_status() {
        let mut doc = doc_with(&[(0, 0, "= 1 / 0")]);
        doc.oops("Unknown key");
        doc.cell_display(CellRef::new(0, 0), View::Values, 18);
        assert_eq!(doc.frame_message(CellRef::new(5, 0)), "Unknown key");
        // Both slots were cleared; the focus cell has no error.
        assert_eq!(doc.frame_message(CellRef::new(5, 0)), "");
    }

    #[test]
    fn test_frame_message_first_error_then_focus() {
        let mut doc = doc_with(&[(0, 0, "= 1 / 0"), (0, 1, "= (")]);
        doc.cell_display(CellRef::new(0, 0), View::Values, 18);
        doc.cell_display(CellRef::new(0, 1), View::Values, 18);
        assert_eq!(doc.frame_message(CellRef::new(3, 3)), "Divide by 0");
        assert_eq!(
            doc.frame_message(CellRef::new(0, 1)),
            "Syntax error: expected a factor"
        );
    }

    #[test]
    fn test_header_line() {
        assert_eq!(header_line(View::Values, 2, 4), "      0    1");
        assert_eq!(
            header_line(View::Formulas, 2, 18).trim_end(),
            format!("(formulas){:>11} {:>18}", 0, 1)
        );
        // No room for the marker: header is left as is.
        assert_eq!(header_line(View::Formulas, 2, 4), "      0    1");
    }

    #[test]
    fn test_render_text() {
        let mut doc = Document::new(2, 2);
        doc.set_text(CellRef::new(0, 0), "= 2 ^ 3 ^ 2").unwrap();
        doc.set_text(CellRef::new(1, 1), "x").unwrap();
        assert_eq!(
            doc.render_text(View::Values, 5),
            [
                format!("  {:>6}{:>6}", 0, 1),
                format!(" 0 {:>5} {:5}", 512, ""),
                format!(" 1 {:5} {:>5}", "", "x"),
                String::new(),
            ]
            .join("\n")
        );
    }
}
