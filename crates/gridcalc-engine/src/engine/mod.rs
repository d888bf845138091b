//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Sheet`] - Fixed grid of cells with on-demand recompute and cycle detection
//! - [`Cell`], [`Status`] - Per-cell text and evaluation state
//! - [`CellRef`] - Zero-based `(row, col)` coordinates
//! - [`Lexer`], [`Token`] - Formula tokenizer
//! - [`evaluate`], [`Resolver`] - Precedence-climbing formula evaluator
//! - [`propagate`] - How a referred cell's error shows up in the referrer
//! - [`format_number`], [`fit_to_width`] - Format values for display

mod cell;
mod cell_ref;
mod error;
mod eval;
mod format;
mod lexer;
mod policy;
mod sheet;

pub use cell::{Cell, Status, find_formula, is_blank, is_formula};
pub use cell_ref::CellRef;
pub use error::ErrorKind;
pub use eval::{Resolver, evaluate};
pub use format::{fit_to_width, format_number};
pub use lexer::{Ident, Lexer, Op, Token};
pub use policy::propagate;
pub use sheet::{DEFAULT_COLS, DEFAULT_ROWS, Sheet};
