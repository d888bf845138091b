//! Application state and logic.
//!
//! [`App`] holds the document, the cursor and viewport, and the line editor
//! buffer. The app is either navigating the grid ([`Mode::Normal`]) or
//! editing a line of text ([`Mode::Edit`] for cell text, [`Mode::SaveAs`]
//! for the file name to write).

use gridcalc_core::{CellRef, Document, View};
use std::path::Path;
use tracing::debug;

use super::keymap::Keymap;

/// Longest text the line editor accepts, in characters.
pub const MAX_INPUT_CHARS: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the grid, execute single-key commands.
    Normal,
    /// Edit the text of the focus cell.
    Edit,
    /// Enter the file name to write.
    SaveAs,
}

pub struct App {
    pub doc: Document,
    /// Current cursor position (row)
    pub cursor_row: usize,
    /// Current cursor position (column)
    pub cursor_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    pub mode: Mode,
    /// Line editor buffer
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    pub view: View,
    /// Column width for display
    pub col_width: usize,
    pub keymap: Keymap,
    /// Status line of the last drawn frame
    pub status_message: String,
}

impl App {
    pub fn new(doc: Document, col_width: usize, keymap: Keymap) -> Self {
        App {
            doc,
            cursor_row: 0,
            cursor_col: 0,
            viewport_row: 0,
            viewport_col: 0,
            visible_rows: 20,
            visible_cols: 4,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            view: View::Values,
            col_width,
            keymap,
            status_message: String::new(),
        }
    }

    pub fn current_cell_ref(&self) -> CellRef {
        CellRef::new(self.cursor_row, self.cursor_col)
    }

    fn neighbour(&self, dx: i32, dy: i32) -> CellRef {
        self.current_cell_ref().offset_clamped(
            dy as isize,
            dx as isize,
            self.doc.rows(),
            self.doc.cols(),
        )
    }

    /// Move cursor by delta, clamping to the grid
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let to = self.neighbour(dx, dy);
        self.cursor_row = to.row;
        self.cursor_col = to.col;
        self.update_viewport();
    }

    /// Copy the focus cell's text to its neighbour and move there.
    ///
    /// At the edge of the grid the neighbour is the focus cell itself.
    pub fn copy_to_neighbour(&mut self, dx: i32, dy: i32) {
        let from = self.current_cell_ref();
        let to = self.neighbour(dx, dy);
        if let Err(e) = self.doc.copy_text(from, to) {
            self.doc.oops(e.to_string());
            return;
        }
        debug!(%from, %to, "copied cell text");
        self.cursor_row = to.row;
        self.cursor_col = to.col;
        self.update_viewport();
    }

    /// Update viewport to keep cursor visible
    pub fn update_viewport(&mut self) {
        if self.cursor_col < self.viewport_col {
            self.viewport_col = self.cursor_col;
        } else if self.cursor_col >= self.viewport_col + self.visible_cols {
            self.viewport_col = self.cursor_col + 1 - self.visible_cols;
        }

        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row + 1 - self.visible_rows;
        }
    }

    fn start_line_edit(&mut self, mode: Mode, initial: &str) {
        self.edit_buffer = initial.chars().take(MAX_INPUT_CHARS).collect();
        self.edit_cursor = self.edit_buffer.len(); // Cursor at end
        self.mode = mode;
    }

    /// Enter edit mode for the focus cell
    pub fn enter_edit_mode(&mut self) {
        let text = self.doc.text_of(self.current_cell_ref()).to_string();
        self.start_line_edit(Mode::Edit, &text);
    }

    /// Prompt for the file name to write, starting from the current one
    pub fn enter_save_prompt(&mut self) {
        let name = self
            .doc
            .file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.start_line_edit(Mode::SaveAs, &name);
    }

    fn finish_line_edit(&mut self) -> String {
        self.mode = Mode::Normal;
        self.edit_cursor = 0;
        std::mem::take(&mut self.edit_buffer)
    }

    /// Commit the line editor: set the cell text or write the file.
    pub fn commit_input(&mut self) {
        let mode = self.mode;
        let at = self.current_cell_ref();
        let text = self.finish_line_edit();
        let result = match mode {
            Mode::Edit => self.doc.set_text(at, &text),
            Mode::SaveAs => self.doc.save_as(Path::new(&text)).map(|_| ()),
            Mode::Normal => Ok(()),
        };
        if let Err(e) = result {
            self.doc.oops(e.to_string());
        }
    }

    /// Abort the line editor, leaving the sheet as it was.
    pub fn cancel_input(&mut self) {
        if self.mode != Mode::Normal {
            self.finish_line_edit();
            self.doc.oops("Aborted");
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Document::new(20, 4), 18, Keymap::default())
    }

    #[test]
    fn move_cursor_clamps_to_grid() {
        let mut app = app();
        app.move_cursor(-1, -1);
        assert_eq!(app.current_cell_ref(), CellRef::new(0, 0));
        app.move_cursor(10, 50);
        assert_eq!(app.current_cell_ref(), CellRef::new(19, 3));
    }

    #[test]
    fn viewport_follows_cursor() {
        let mut app = app();
        app.visible_rows = 5;
        app.visible_cols = 2;
        app.move_cursor(3, 7);
        assert_eq!((app.viewport_row, app.viewport_col), (3, 2));
        app.move_cursor(-3, -7);
        assert_eq!((app.viewport_row, app.viewport_col), (0, 0));
    }

    #[test]
    fn copy_to_neighbour_copies_and_moves() {
        let mut app = app();
        app.doc.set_text(CellRef::new(0, 0), "= r + 1").unwrap();
        app.copy_to_neighbour(0, 1);
        assert_eq!(app.current_cell_ref(), CellRef::new(1, 0));
        assert_eq!(app.doc.text_of(CellRef::new(1, 0)), "= r + 1");
        assert_eq!(app.doc.sheet.get_value(1, 0), Ok(2.0));
    }

    #[test]
    fn copy_at_edge_stays_put() {
        let mut app = app();
        app.doc.set_text(CellRef::new(0, 0), "7").unwrap();
        app.copy_to_neighbour(-1, 0);
        assert_eq!(app.current_cell_ref(), CellRef::new(0, 0));
        assert_eq!(app.doc.text_of(CellRef::new(0, 0)), "7");
    }

    #[test]
    fn edit_commit_sets_text() {
        let mut app = app();
        app.enter_edit_mode();
        assert_eq!(app.mode, Mode::Edit);
        app.edit_buffer = "= 6 * 7".to_string();
        app.commit_input();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.doc.sheet.get_value(0, 0), Ok(42.0));
        assert!(app.doc.modified);
    }

    #[test]
    fn edit_prefill_is_capped() {
        let mut app = app();
        let long = "x".repeat(120);
        app.doc.set_text(CellRef::new(0, 0), &long).unwrap();
        app.enter_edit_mode();
        assert_eq!(app.edit_buffer.chars().count(), MAX_INPUT_CHARS);
        assert_eq!(app.edit_cursor, MAX_INPUT_CHARS);
    }

    #[test]
    fn cancel_leaves_text_and_reports_aborted() {
        let mut app = app();
        app.doc.set_text(CellRef::new(0, 0), "keep").unwrap();
        app.doc.modified = false;
        app.enter_edit_mode();
        app.edit_buffer.push_str(" me not");
        app.cancel_input();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.doc.text_of(CellRef::new(0, 0)), "keep");
        assert!(!app.doc.modified);
        assert_eq!(app.doc.status(), Some("Aborted"));
    }

    #[test]
    fn save_prompt_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.vc");
        let mut app = app();
        app.doc.set_text(CellRef::new(2, 1), "= 1 + 1").unwrap();
        app.enter_save_prompt();
        assert_eq!(app.edit_buffer, "");
        app.edit_buffer = path.display().to_string();
        app.commit_input();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2 1 = 1 + 1\n");
        assert_eq!(app.doc.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(app.doc.status(), Some("File written"));
    }

    #[test]
    fn failed_save_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.enter_save_prompt();
        app.edit_buffer = dir.path().join("missing/dir/out.vc").display().to_string();
        app.commit_input();
        assert!(app.doc.status().is_some_and(|s| s != "File written"));
        assert_eq!(app.doc.file_path, None);
    }
}
