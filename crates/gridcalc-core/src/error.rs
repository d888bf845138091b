//! Error types for Gridcalc core.

use gridcalc_engine::engine::CellRef;
use thiserror::Error;

/// Errors that can occur in the Gridcalc application
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Cell {0} out of range")]
    OutOfRange(CellRef),
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
