//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::{centered, render_error_dialog, render_results_dialog, wrap_text, FormOutcome};
