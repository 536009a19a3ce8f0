//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Cursor glyph drawn after the text of the active field
pub const CURSOR: &str = "▌";

/// How a field box should look this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldLook {
    pub is_active: bool,
    pub is_invalid: bool,
    pub is_disabled: bool,
}

impl FieldLook {
    pub fn border_style(&self) -> Style {
        if self.is_active {
            Style::default().fg(Color::Cyan)
        } else if self.is_invalid {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn text_style(&self) -> Style {
        if self.is_disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }
}

/// Draw a bordered field box titled with `label` around `lines`
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, lines: Vec<Line>, look: FieldLook) {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(look.border_style());

    frame.render_widget(
        Paragraph::new(lines)
            .style(look.text_style())
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Text content of an input-like field, with the cursor spliced in when active.
/// `cursor` is a char index into `value`.
pub fn text_lines(value: &str, cursor: usize, look: FieldLook) -> Vec<Line<'static>> {
    if value.is_empty() && !look.is_active {
        return vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let cursor_style = Style::default().fg(Color::Cyan);
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw_line in value.split('\n') {
        let len = raw_line.chars().count();
        let mut spans = Vec::new();
        if look.is_active && cursor >= offset && cursor <= offset + len {
            let at = cursor - offset;
            let before: String = raw_line.chars().take(at).collect();
            let after: String = raw_line.chars().skip(at).collect();
            spans.push(Span::raw(before));
            spans.push(Span::styled(CURSOR, cursor_style));
            spans.push(Span::raw(after));
        } else {
            spans.push(Span::raw(raw_line.to_string()));
        }
        lines.push(Line::from(spans));
        // the newline itself occupies one cursor position
        offset += len + 1;
    }
    lines
}

/// Draw validation messages (red) and help text (gray) under a field
pub fn draw_messages(frame: &mut Frame, area: Rect, errors: &[String], help: Option<&str>) {
    let mut lines: Vec<Line> = errors
        .iter()
        .map(|msg| {
            Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Red),
            ))
        })
        .collect();
    if let Some(help) = help {
        lines.push(Line::from(Span::styled(
            format!(" {help}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw a section header for a composed sub-form
pub fn draw_section_header(frame: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {title} "),
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_inactive_shows_placeholder() {
        let lines = text_lines("", 0, FieldLook::default());
        assert_eq!(line_text(&lines[0]), "(empty)");
    }

    #[test]
    fn test_cursor_spliced_at_position() {
        let look = FieldLook {
            is_active: true,
            ..Default::default()
        };
        let lines = text_lines("abc", 1, look);
        assert_eq!(line_text(&lines[0]), format!("a{CURSOR}bc"));
    }

    #[test]
    fn test_cursor_on_second_line() {
        let look = FieldLook {
            is_active: true,
            ..Default::default()
        };
        let lines = text_lines("ab\ncd", 5, look);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "ab");
        assert_eq!(line_text(&lines[1]), format!("cd{CURSOR}"));
    }

    #[test]
    fn test_inactive_has_no_cursor() {
        let lines = text_lines("abc", 3, FieldLook::default());
        assert_eq!(line_text(&lines[0]), "abc");
    }

    #[test]
    fn test_border_colors() {
        let active = FieldLook {
            is_active: true,
            is_invalid: true,
            ..Default::default()
        };
        assert_eq!(active.border_style().fg, Some(Color::Cyan));
        let invalid = FieldLook {
            is_invalid: true,
            ..Default::default()
        };
        assert_eq!(invalid.border_style().fg, Some(Color::Red));
    }
}
