//! Results dialog shown after a form finishes

use super::base::{render_dialog, DialogConfig};
use crate::state::FormData;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// How a form ended, with what to show about it
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Submitted {
        title: String,
        data: FormData,
        /// Name looked up, and what the lookup found
        lookups: Vec<(String, String)>,
    },
    Cancelled {
        title: String,
    },
}

impl FormOutcome {
    pub fn heading(&self) -> String {
        match self {
            FormOutcome::Submitted { title, .. } => format!("{title} submitted"),
            FormOutcome::Cancelled { title } => format!("{title} cancelled"),
        }
    }

    /// Body text: the cleaned data as JSON, then the lookup results
    pub fn message(&self) -> String {
        match self {
            FormOutcome::Submitted { data, lookups, .. } => {
                let json = serde_json::to_string_pretty(data)
                    .unwrap_or_else(|e| format!("<could not encode data: {e}>"));
                let mut message = format!("Form data:\n{json}");
                if !lookups.is_empty() {
                    message.push_str("\n\nField lookup:");
                    for (name, found) in lookups {
                        message.push_str(&format!("\n  get_field(\"{name}\") -> {found}"));
                    }
                }
                message
            }
            FormOutcome::Cancelled { .. } => "The form was cancelled. No data was submitted.".into(),
        }
    }
}

/// Render the outcome of a form as a centered overlay
pub fn render_results_dialog(frame: &mut Frame, outcome: &FormOutcome) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled("n", key_style),
        Span::raw(" new form  "),
        Span::styled("Esc", key_style),
        Span::raw(" back  "),
        Span::styled("q", key_style),
        Span::raw(" quit"),
    ];
    let (title_color, border_color) = match outcome {
        FormOutcome::Submitted { .. } => (Color::Green, Color::Green),
        FormOutcome::Cancelled { .. } => (Color::Yellow, Color::Yellow),
    };

    let heading = outcome.heading();
    let message = outcome.message();
    render_dialog(
        frame,
        DialogConfig {
            title: &heading,
            title_color,
            border_color,
            message: &message,
            hint: Some(hint),
            max_width: 76,
        },
    );
}
