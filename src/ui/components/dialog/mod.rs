//! Dialog components for TUI

mod base;
mod error_dialog;
mod results_dialog;

pub use base::{centered, wrap_text};
pub use error_dialog::render_error_dialog;
pub use results_dialog::{render_results_dialog, FormOutcome};
