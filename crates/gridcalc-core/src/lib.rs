//! gridcalc-core - UI-agnostic document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{CellDisplay, Document, View};
pub use error::{GridcalcError, Result};

pub use gridcalc_engine::engine::CellRef;
