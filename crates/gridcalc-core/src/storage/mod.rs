//! Storage for the line-per-cell sheet format.
//!
//! Each non-blank cell is one line, `<row> <col> <text>`, in row-major order.

mod parser;
mod writer;

pub use parser::{Entry, Parsed, parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};
