use crate::error::Result;
use gridcalc_engine::engine::{CellRef, Sheet};
use std::path::PathBuf;

/// UI-agnostic document state for the spreadsheet.
pub struct Document {
    /// The cell grid and its evaluation state
    pub sheet: Sheet,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since the last load or save
    pub modified: bool,
    /// First message raised since the status line was last drawn
    status: Option<String>,
}

impl Document {
    /// Create an empty document with a `rows` x `cols` sheet.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new(rows: usize, cols: usize) -> Self {
        Document {
            sheet: Sheet::new(rows, cols),
            file_path: None,
            modified: false,
            status: None,
        }
    }

    /// Create a new document and load a file if provided.
    ///
    /// A path that does not exist yet is adopted as the save target and
    /// reported as a fresh file.
    pub fn with_file(path: Option<PathBuf>, rows: usize, cols: usize) -> Result<Self> {
        let mut doc = Self::new(rows, cols);
        if let Some(p) = path {
            if p.exists() {
                doc.load_file(&p)?;
            } else {
                doc.file_path = Some(p);
                doc.oops("Fresh file");
            }
        }
        Ok(doc)
    }

    /// Record a status message, unless one is already pending.
    pub fn oops(&mut self, message: impl Into<String>) {
        if self.status.is_none() {
            self.status = Some(message.into());
        }
    }

    /// The pending status message, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Take the pending status message, clearing it.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    pub fn rows(&self) -> usize {
        self.sheet.rows()
    }

    pub fn cols(&self) -> usize {
        self.sheet.cols()
    }

    /// Raw text of a cell; empty outside the grid.
    pub fn text_of(&self, at: CellRef) -> &str {
        self.sheet.text_of(at.row, at.col).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_status_message_wins() {
        let mut doc = Document::new(20, 4);
        doc.oops("Unknown key");
        doc.oops("Aborted");
        assert_eq!(doc.status(), Some("Unknown key"));
        assert_eq!(doc.take_status(), Some("Unknown key".to_string()));
        assert_eq!(doc.take_status(), None);
        doc.oops("Aborted");
        assert_eq!(doc.status(), Some("Aborted"));
    }

    #[test]
    fn test_missing_file_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.vc");
        let doc = Document::with_file(Some(path.clone()), 20, 4).unwrap();
        assert_eq!(doc.file_path, Some(path));
        assert_eq!(doc.status(), Some("Fresh file"));
        assert!(!doc.modified);
    }

    #[test]
    fn test_text_outside_grid_is_empty() {
        let doc = Document::new(20, 4);
        assert_eq!(doc.text_of(CellRef::new(25, 0)), "");
    }
}
