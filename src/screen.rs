//! Drawing for the demo application

use crate::app::{App, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tui_forms::platform::{QUIT_SHORTCUT, SUBMIT_SHORTCUT};
use tui_forms::ui::components::{centered, render_error_dialog, render_results_dialog};

/// Widest a form is drawn
const FORM_MAX_WIDTH: u16 = 80;
const LAUNCHER_WIDTH: u16 = 64;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match app.view {
        View::Launcher => draw_launcher(frame, chunks[0], app),
        View::Form | View::Results => draw_form(frame, chunks[0], app),
    }

    if app.view == View::Results {
        if let Some(outcome) = &app.outcome {
            render_results_dialog(frame, outcome);
        }
    }

    if let Some(error) = app.errors.first() {
        render_error_dialog(frame, error);
    }

    draw_status_bar(frame, chunks[1], app);
}

fn draw_launcher(frame: &mut Frame, area: Rect, app: &App) {
    let demos = app.demos();
    let height = u16::try_from(demos.len() * 2).unwrap_or(u16::MAX).saturating_add(4);
    let box_area = centered(area, LAUNCHER_WIDTH, height);

    let items: Vec<ListItem> = demos
        .iter()
        .enumerate()
        .map(|(i, demo)| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("{}. {}", i + 1, demo.name),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("   {}", demo.description),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Select a Form ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("▸ ");
    render_scrollable_list(frame, box_area, list, app.selected);
}

/// Render a list that keeps the selected item in view
fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.form else {
        return;
    };
    let width = area.width.min(FORM_MAX_WIDTH);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };
    form.draw(frame, form_area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match app.view {
        View::Launcher => "j/k:nav  Enter:open  1-5:open  q:quit".to_string(),
        View::Form => format!("Tab:next  {SUBMIT_SHORTCUT}:submit  Esc:cancel"),
        View::Results => "n:new form  Esc:back  q:quit".to_string(),
    };
    let quit_hint = format!(" {QUIT_SHORTCUT}:quit ");
    let quit_width = u16::try_from(quit_hint.len()).unwrap_or(0).min(area.width);

    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {hints}"),
        Style::default().fg(Color::Gray),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width - quit_width,
        width: quit_width,
        ..area
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tui_forms::FormsConfig;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_launcher_lists_demos() {
        let app = App::new(FormsConfig::default());
        let text = screen(&app);
        assert!(text.contains("Select a Form"));
        assert!(text.contains("1. Basic Form"));
        assert!(text.contains("5. Nested Twice"));
    }

    #[test]
    fn test_form_and_error_dialog() {
        let mut app = App::new(FormsConfig::default());
        app.open_demo(0);
        app.push_error("Something failed");
        let text = screen(&app);
        assert!(text.contains("User Registration"));
        assert!(text.contains("Something failed"));
    }
}
