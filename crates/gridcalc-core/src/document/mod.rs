//! Document state and logic (UI-agnostic).

mod display;
mod io;
mod ops;
mod state;

pub use display::{CellDisplay, View};
pub use state::Document;
