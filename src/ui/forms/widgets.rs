//! Input widgets: the on-screen counterparts of fields
//!
//! A widget never owns the value it edits. The form keeps the raw value on
//! the bound field; the widget draws it and edits it in place, keeping only
//! UI state such as the cursor or the highlighted option.

use super::field_renderer::{draw_field, text_lines, FieldLook};
use crate::state::{BoundField, Choice, Value};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use std::fmt;

/// Height of a single-line boxed widget (borders + content)
pub const LINE_WIDGET_HEIGHT: u16 = 3;
/// Height of a text area
pub const TEXT_AREA_HEIGHT: u16 = 6;

/// What the form tells a widget about the frame being drawn
#[derive(Debug, Clone)]
pub struct DrawContext {
    /// Label with the required marker applied
    pub label: String,
    pub look: FieldLook,
}

pub trait FormWidget: fmt::Debug {
    /// Registry name
    fn name(&self) -> &str;

    /// Rows needed to draw `field`
    fn height(&self, field: &BoundField) -> u16;

    fn draw(&self, frame: &mut Frame, area: Rect, field: &BoundField, ctx: &DrawContext);

    /// Apply a key to the field's raw value. Returns true if the key was used.
    fn handle_key(&mut self, key: KeyEvent, field: &mut BoundField) -> bool;

    /// While true the widget gets every key, including Tab, Enter and Esc
    fn is_capturing(&self) -> bool {
        false
    }
}

fn is_plain_char(key: &KeyEvent) -> bool {
    !key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}

/// Shared cursor editing for the text widgets. `accept` decides whether a
/// char may be inserted at a char position.
fn edit_text(
    text: &mut String,
    cursor: &mut usize,
    key: KeyEvent,
    accept: impl Fn(char, &str, usize) -> bool,
) -> bool {
    let len = text.chars().count();
    *cursor = (*cursor).min(len);
    match key.code {
        KeyCode::Char(c) if is_plain_char(&key) => {
            if !accept(c, text.as_str(), *cursor) {
                return false;
            }
            let at = byte_index(text, *cursor);
            text.insert(at, c);
            *cursor += 1;
            true
        }
        KeyCode::Backspace => {
            if *cursor > 0 {
                let at = byte_index(text, *cursor - 1);
                text.remove(at);
                *cursor -= 1;
            }
            true
        }
        KeyCode::Delete => {
            if *cursor < len {
                let at = byte_index(text, *cursor);
                text.remove(at);
            }
            true
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            true
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(len);
            true
        }
        KeyCode::Home => {
            *cursor = 0;
            true
        }
        KeyCode::End => {
            *cursor = len;
            true
        }
        _ => false,
    }
}

/// Make sure the raw value is text before editing it
fn raw_text(field: &mut BoundField) -> &mut String {
    let raw = field.raw_mut();
    if !matches!(raw, Value::Str(_)) {
        *raw = Value::Str(raw.to_text());
    }
    match raw {
        Value::Str(s) => s,
        _ => unreachable!("raw value was just made text"),
    }
}

/// Single-line text input. With `integer` set only digits and a leading
/// minus sign are accepted.
#[derive(Debug, Default)]
pub struct TextInput {
    cursor: Option<usize>,
    integer: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integer() -> Self {
        Self {
            cursor: None,
            integer: true,
        }
    }

    /// Char position of the cursor; starts at the end of the current value
    fn cursor_for(&self, text: &str) -> usize {
        self.cursor.unwrap_or_else(|| text.chars().count())
    }
}

impl FormWidget for TextInput {
    fn name(&self) -> &str {
        if self.integer {
            "integer_input"
        } else {
            "input"
        }
    }

    fn height(&self, _field: &BoundField) -> u16 {
        LINE_WIDGET_HEIGHT
    }

    fn draw(&self, frame: &mut Frame, area: Rect, field: &BoundField, ctx: &DrawContext) {
        let text = field.raw().to_text();
        let cursor = self.cursor_for(&text);
        draw_field(frame, area, &ctx.label, text_lines(&text, cursor, ctx.look), ctx.look);
    }

    fn handle_key(&mut self, key: KeyEvent, field: &mut BoundField) -> bool {
        let integer = self.integer;
        let text = raw_text(field);
        let mut cursor = self.cursor_for(text);
        let used = edit_text(text, &mut cursor, key, |c, current, at| {
            if !integer {
                return c != '\n';
            }
            // nothing goes in front of a leading minus
            if at == 0 && current.starts_with('-') {
                return false;
            }
            c.is_ascii_digit() || (c == '-' && at == 0)
        });
        self.cursor = Some(cursor);
        used
    }
}

/// Multi-line text; Enter inserts a newline
#[derive(Debug, Default)]
pub struct TextArea {
    cursor: Option<usize>,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormWidget for TextArea {
    fn name(&self) -> &str {
        "textarea"
    }

    fn height(&self, _field: &BoundField) -> u16 {
        TEXT_AREA_HEIGHT
    }

    fn draw(&self, frame: &mut Frame, area: Rect, field: &BoundField, ctx: &DrawContext) {
        let text = field.raw().to_text();
        let cursor = self.cursor.unwrap_or_else(|| text.chars().count());
        draw_field(frame, area, &ctx.label, text_lines(&text, cursor, ctx.look), ctx.look);
    }

    fn handle_key(&mut self, key: KeyEvent, field: &mut BoundField) -> bool {
        let text = raw_text(field);
        let mut cursor = self.cursor.unwrap_or_else(|| text.chars().count());
        let used = if key.code == KeyCode::Enter {
            let at = byte_index(text, cursor.min(text.chars().count()));
            text.insert(at, '\n');
            cursor += 1;
            true
        } else {
            edit_text(text, &mut cursor, key, |_, _, _| true)
        };
        self.cursor = Some(cursor);
        used
    }
}

/// Boolean toggle; Space or Enter flips it
#[derive(Debug, Default)]
pub struct Checkbox;

impl FormWidget for Checkbox {
    fn name(&self) -> &str {
        "checkbox"
    }

    fn height(&self, _field: &BoundField) -> u16 {
        LINE_WIDGET_HEIGHT
    }

    fn draw(&self, frame: &mut Frame, area: Rect, field: &BoundField, ctx: &DrawContext) {
        let checked = field.raw().as_bool().unwrap_or(false);
        let mark = if checked { "[x]" } else { "[ ]" };
        let mark_style = if checked {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(mark, mark_style),
            Span::raw(" "),
            Span::raw(if checked { "Yes" } else { "No" }),
        ]);
        draw_field(frame, area, &ctx.label, vec![line], ctx.look);
    }

    fn handle_key(&mut self, key: KeyEvent, field: &mut BoundField) -> bool {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                let checked = field.raw().as_bool().unwrap_or(false);
                field.set_raw(Value::Bool(!checked));
                true
            }
            _ => false,
        }
    }
}

/// Options offered by a choice widget: a blank entry first unless required
fn options(field: &BoundField) -> Vec<Option<&Choice>> {
    let mut opts = Vec::new();
    if !field.field.required {
        opts.push(None);
    }
    opts.extend(field.field.choices().iter().map(Some));
    opts
}

fn selected_index(field: &BoundField) -> Option<usize> {
    let current = field.raw().to_text();
    options(field).iter().position(|opt| match opt {
        Some(choice) => choice.value == current,
        None => current.is_empty(),
    })
}

fn choose(field: &mut BoundField, index: usize) {
    let value = options(field)
        .get(index)
        .map(|opt| opt.map(|c| c.value.clone()).unwrap_or_default());
    if let Some(value) = value {
        field.set_raw(Value::Str(value));
    }
}

fn option_label(opt: Option<&Choice>, prompt: &str) -> String {
    opt.map_or_else(|| prompt.to_string(), |c| c.label.clone())
}

/// Dropdown: Enter opens the list, Up/Down highlight, Enter picks, Esc closes
#[derive(Debug)]
pub struct Select {
    open: bool,
    highlighted: usize,
    prompt: String,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            open: false,
            highlighted: 0,
            prompt: "Select an option".to_string(),
        }
    }
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl FormWidget for Select {
    fn name(&self) -> &str {
        "select"
    }

    fn height(&self, field: &BoundField) -> u16 {
        if self.open {
            // closed line + one row per option
            let rows = u16::try_from(options(field).len()).unwrap_or(u16::MAX);
            LINE_WIDGET_HEIGHT.saturating_add(rows)
        } else {
            LINE_WIDGET_HEIGHT
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, field: &BoundField, ctx: &DrawContext) {
        let opts = options(field);
        let current = selected_index(field).and_then(|i| opts.get(i).copied().flatten());
        let arrow = if self.open { "▴" } else { "▾" };
        let mut lines = vec![Line::from(vec![
            Span::raw(option_label(current, &self.prompt)),
            Span::raw(" "),
            Span::styled(arrow, Style::default().fg(Color::Cyan)),
        ])];
        if self.open {
            for (i, opt) in opts.iter().enumerate() {
                let is_highlighted = i == self.highlighted;
                let marker = if is_highlighted { "▸ " } else { "  " };
                let style = if is_highlighted {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(Span::styled(
                    format!("{marker}{}", option_label(*opt, "(none)")),
                    style,
                )));
            }
        }
        draw_field(frame, area, &ctx.label, lines, ctx.look);
    }

    fn handle_key(&mut self, key: KeyEvent, field: &mut BoundField) -> bool {
        let count = options(field).len();
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') if count > 0 => {
                    self.open = true;
                    self.highlighted = selected_index(field).unwrap_or(0);
                    true
                }
                _ => false,
            };
        }
        match key.code {
            KeyCode::Up => {
                self.highlighted = self.highlighted.checked_sub(1).unwrap_or(count - 1);
            }
            KeyCode::Down => {
                self.highlighted = (self.highlighted + 1) % count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                choose(field, self.highlighted);
                self.open = false;
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => {
                self.open = false;
            }
            _ => {}
        }
        true
    }

    fn is_capturing(&self) -> bool {
        self.open
    }
}

/// Radio set: every choice visible, Up/Down move, Space or Enter picks
#[derive(Debug, Default)]
pub struct RadioSet {
    highlighted: Option<usize>,
}

impl RadioSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn highlighted_for(&self, field: &BoundField) -> usize {
        self.highlighted
            .or_else(|| selected_index(field))
            .unwrap_or(0)
    }
}

impl FormWidget for RadioSet {
    fn name(&self) -> &str {
        "radio"
    }

    fn height(&self, field: &BoundField) -> u16 {
        let rows = u16::try_from(field.field.choices().len()).unwrap_or(u16::MAX);
        rows.max(1).saturating_add(2)
    }

    fn draw(&self, frame: &mut Frame, area: Rect, field: &BoundField, ctx: &DrawContext) {
        let current = field.raw().to_text();
        let highlighted = self.highlighted_for(field);
        let choices = field.field.choices();
        let lines: Vec<Line> = choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let mark = if choice.value == current { "(•)" } else { "( )" };
                // the blank option is not listed, so shift by one when present
                let row = if field.field.required { i } else { i + 1 };
                let style = if ctx.look.is_active && row == highlighted {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(format!("{mark} {}", choice.label), style))
            })
            .collect();
        draw_field(frame, area, &ctx.label, lines, ctx.look);
    }

    fn handle_key(&mut self, key: KeyEvent, field: &mut BoundField) -> bool {
        let count = options(field).len();
        if count == 0 {
            return false;
        }
        // the blank option cannot be highlighted
        let first = usize::from(!field.field.required);
        let current = self.highlighted_for(field).max(first);
        match key.code {
            KeyCode::Up if current > first => {
                self.highlighted = Some(current - 1);
                true
            }
            KeyCode::Down if current + 1 < count => {
                self.highlighted = Some(current + 1);
                true
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                choose(field, current);
                self.highlighted = Some(current);
                true
            }
            _ => false,
        }
    }
}
