//! Rendered forms: one widget per field, focus, buttons and submission

use super::field_renderer::{draw_messages, draw_section_header, FieldLook};
use super::registry::WidgetRegistry;
use super::widgets::{DrawContext, FormWidget};
use crate::config::FormsConfig;
use crate::error::{FormError, Result, ValidationErrors};
use crate::platform::{is_submit, SUBMIT_SHORTCUT};
use crate::state::{BoundField, Form, FormEvent, FormHandler, Value};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// Shown when a submission is rejected
pub const FIX_ERRORS_NOTICE: &str = "Please fix the errors before submitting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitted,
    Cancelled,
}

impl Form {
    /// Render with the built-in widgets and default settings
    pub fn render(self) -> Result<RenderedForm> {
        self.render_with(&WidgetRegistry::with_builtins(), FormsConfig::default())
    }

    /// Build one widget per field from `registry`
    pub fn render_with(self, registry: &WidgetRegistry, config: FormsConfig) -> Result<RenderedForm> {
        let widgets = self
            .fields()
            .iter()
            .map(|bound| registry.create(&bound.field))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            form = self.schema().name(),
            widgets = widgets.len(),
            "form rendered"
        );
        Ok(RenderedForm::new(self, widgets, config))
    }
}

/// A form on screen, handling keys until it is submitted or cancelled
#[derive(Debug)]
pub struct RenderedForm {
    form: Form,
    widgets: Vec<Box<dyn FormWidget>>,
    config: FormsConfig,
    focus: Focus,
    button: FormButton,
    errors: Vec<Vec<String>>,
    notice: Option<String>,
    phase: FormPhase,
}

impl RenderedForm {
    fn new(form: Form, widgets: Vec<Box<dyn FormWidget>>, config: FormsConfig) -> Self {
        let errors = vec![Vec::new(); form.len()];
        let mut rendered = Self {
            form,
            widgets,
            config,
            focus: Focus::Buttons,
            button: FormButton::Submit,
            errors,
            notice: None,
            phase: FormPhase::Editing,
        };
        rendered.focus = rendered.first_focus();
        rendered
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Direct access to the bound form. Widgets pick up changed raw values
    /// on the next draw.
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Give the form back, for instance to render it again later
    pub fn into_form(self) -> Form {
        self.form
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn widget_names(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.name()).collect()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_button(&self) -> FormButton {
        self.button
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn raw_value(&self, name: &str) -> Result<&Value> {
        self.form.raw_value(name)
    }

    /// Inline messages currently shown under `name`
    pub fn errors_for(&self, name: &str) -> Result<&[String]> {
        let index = self.form.resolve(name)?;
        Ok(&self.errors[index])
    }

    /// Move focus to the field `name` refers to
    pub fn focus_field(&mut self, name: &str) -> Result<()> {
        let index = self.form.resolve(name)?;
        self.focus = Focus::Field(index);
        Ok(())
    }

    /// Back to editing after a submit or cancel, keeping the values
    pub fn reopen(&mut self) {
        self.phase = FormPhase::Editing;
        self.notice = None;
    }

    fn is_focusable(&self, index: usize) -> bool {
        self.form
            .field_at(index)
            .is_some_and(|bound| !bound.field.disabled)
    }

    fn first_focus(&self) -> Focus {
        (0..self.form.len())
            .find(|&i| self.is_focusable(i))
            .map_or(Focus::Buttons, Focus::Field)
    }

    fn next_focus(&mut self) {
        let start = match self.focus {
            Focus::Field(i) => i + 1,
            Focus::Buttons => {
                self.focus = self.first_focus();
                return;
            }
        };
        self.focus = (start..self.form.len())
            .find(|&i| self.is_focusable(i))
            .map_or(Focus::Buttons, Focus::Field);
    }

    fn prev_focus(&mut self) {
        let end = match self.focus {
            Focus::Field(i) => i,
            Focus::Buttons => self.form.len(),
        };
        self.focus = (0..end)
            .rev()
            .find(|&i| self.is_focusable(i))
            .map_or(Focus::Buttons, Focus::Field);
    }

    fn focused_widget_captures(&self) -> bool {
        match self.focus {
            Focus::Field(i) => self.widgets.get(i).is_some_and(|w| w.is_capturing()),
            Focus::Buttons => false,
        }
    }

    /// Process one key. Returns the event when the key finished the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        if self.phase != FormPhase::Editing || key.kind == KeyEventKind::Release {
            return None;
        }

        if self.focused_widget_captures() {
            if let Focus::Field(index) = self.focus {
                self.edit_field(index, key);
            }
            return None;
        }

        if is_submit(&key) {
            return self.submit();
        }

        match key.code {
            KeyCode::Esc => return self.cancel(),
            KeyCode::Tab => self.next_focus(),
            KeyCode::BackTab => self.prev_focus(),
            _ => match self.focus {
                Focus::Buttons => return self.handle_button_key(key),
                Focus::Field(index) => {
                    // Enter on a single-line widget moves on
                    if !self.edit_field(index, key) && key.code == KeyCode::Enter {
                        self.next_focus();
                    }
                }
            },
        }
        None
    }

    /// Like [`handle_key`](Self::handle_key), also dispatching the event
    pub fn handle_key_with(
        &mut self,
        key: KeyEvent,
        handler: &mut dyn FormHandler,
    ) -> Option<FormEvent> {
        let event = self.handle_key(key);
        if let Some(event) = &event {
            event.dispatch(handler);
        }
        event
    }

    fn handle_button_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.button = match self.button {
                    FormButton::Submit => FormButton::Cancel,
                    FormButton::Cancel => FormButton::Submit,
                };
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.button {
                FormButton::Submit => self.submit(),
                FormButton::Cancel => self.cancel(),
            },
            _ => None,
        }
    }

    /// Forward a key to the widget of field `index`
    fn edit_field(&mut self, index: usize, key: KeyEvent) -> bool {
        let Some(bound) = self.form.field_at_mut(index) else {
            return false;
        };
        if bound.field.disabled {
            return false;
        }
        let Some(widget) = self.widgets.get_mut(index) else {
            return false;
        };
        let used = widget.handle_key(key, bound);
        if used && self.config.live_validation() {
            self.revalidate(index);
        }
        used
    }

    fn revalidate(&mut self, index: usize) {
        let Some(bound) = self.form.field_at(index) else {
            return;
        };
        self.errors[index] = messages(bound);
        if self.errors.iter().all(Vec::is_empty) {
            self.notice = None;
        }
    }

    /// Validate and finish the form, or keep it open with inline messages
    pub fn submit(&mut self) -> Option<FormEvent> {
        match self.form.get_data() {
            Ok(data) => {
                self.errors.iter_mut().for_each(Vec::clear);
                self.notice = None;
                self.phase = FormPhase::Submitted;
                tracing::debug!(form = self.form.schema().name(), "form submitted");
                Some(FormEvent::Submitted(data))
            }
            Err(FormError::Validation(errors)) => {
                self.show_errors(&errors);
                None
            }
            Err(other) => {
                self.notice = Some(other.to_string());
                None
            }
        }
    }

    pub fn cancel(&mut self) -> Option<FormEvent> {
        self.phase = FormPhase::Cancelled;
        tracing::debug!(form = self.form.schema().name(), "form cancelled");
        Some(FormEvent::Cancelled)
    }

    fn show_errors(&mut self, errors: &ValidationErrors) {
        let names: Vec<String> = self.form.field_names().into_iter().map(String::from).collect();
        for (index, name) in names.iter().enumerate() {
            self.errors[index] = errors
                .for_field(name)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
        }
        if let Some(first) = self.errors.iter().position(|e| !e.is_empty()) {
            self.focus = Focus::Field(first);
        }
        self.notice = Some(FIX_ERRORS_NOTICE.to_string());
    }

    fn label_for(&self, bound: &BoundField) -> String {
        if bound.field.required {
            format!("{} {}", bound.label(), self.config.required_marker())
        } else {
            bound.label().to_string()
        }
    }

    /// Rows of one field: optional section header, widget, messages
    fn layout_rows(&self) -> Vec<FieldRows> {
        let mut rows = Vec::with_capacity(self.widgets.len());
        let mut headed: HashSet<&str> = HashSet::new();
        for (index, (bound, widget)) in self.form.fields().iter().zip(&self.widgets).enumerate() {
            // one header per titled composition, however its fields are ordered
            let header = bound.section.as_ref().and_then(|s| {
                let title = s.title.as_deref()?;
                headed
                    .insert(s.composed_from.as_str())
                    .then(|| title.to_string())
            });

            let help = u16::from(bound.field.help_text.is_some());
            let errors = u16::try_from(self.errors[index].len()).unwrap_or(u16::MAX);
            rows.push(FieldRows {
                index,
                header,
                widget: widget.height(bound),
                messages: errors.saturating_add(help),
            });
        }
        rows
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .form
            .title()
            .unwrap_or_else(|| self.form.schema().name());
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),                // Fields
                Constraint::Length(1),             // Notice
                Constraint::Length(BUTTON_HEIGHT), // Buttons
                Constraint::Length(1),             // Help
            ])
            .horizontal_margin(1)
            .split(inner);

        self.draw_fields(frame, chunks[0]);
        self.draw_notice(frame, chunks[1]);
        self.draw_buttons(frame, chunks[2]);
        self.draw_help(frame, chunks[3]);
    }

    fn draw_fields(&self, frame: &mut Frame, area: Rect) {
        let rows = self.layout_rows();

        let focused = match self.focus {
            Focus::Field(index) => Some(index),
            Focus::Buttons => None,
        };

        // scroll so the focused field is visible, its top first when it does
        // not fit
        let mut offset = 0u16;
        if let Some(focused) = focused {
            let mut y = 0u16;
            for row in &rows {
                let end = y.saturating_add(row.height());
                if row.index == focused {
                    offset = end.saturating_sub(area.height).min(y);
                    break;
                }
                y = end;
            }
        }
        let bottom = offset.saturating_add(area.height);

        let mut y = 0u16;
        for row in &rows {
            let top = y;
            y = y.saturating_add(row.height());
            let is_focused = focused == Some(row.index);
            if top < offset || (y > bottom && !is_focused) {
                continue;
            }
            let Some(bound) = self.form.field_at(row.index) else {
                continue;
            };
            let mut cursor = area.y + (top - offset);
            let area_bottom = area.y + area.height;
            // rows of this field still inside the area
            let clip = |at: u16, height: u16| {
                Rect::new(area.x, at, area.width, height.min(area_bottom.saturating_sub(at)))
            };

            if let Some(title) = &row.header {
                let header_area = clip(cursor, 1);
                if header_area.height > 0 {
                    draw_section_header(frame, header_area, title);
                }
                cursor += 1;
            }

            let look = FieldLook {
                is_active: self.focus == Focus::Field(row.index),
                is_invalid: !self.errors[row.index].is_empty(),
                is_disabled: bound.field.disabled,
            };
            let ctx = DrawContext {
                label: self.label_for(bound),
                look,
            };
            let widget_area = clip(cursor, row.widget);
            if widget_area.height > 0 {
                self.widgets[row.index].draw(frame, widget_area, bound, &ctx);
            }
            cursor = cursor.saturating_add(row.widget);

            let message_area = clip(cursor, row.messages);
            if message_area.height > 0 {
                draw_messages(
                    frame,
                    message_area,
                    &self.errors[row.index],
                    bound.field.help_text.as_deref(),
                );
            }
        }
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect) {
        if let Some(notice) = &self.notice {
            let line = Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(Paragraph::new(line), area);
        }
    }

    fn draw_buttons(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(16), // Submit
                Constraint::Length(16), // Cancel
                Constraint::Min(0),
            ])
            .split(area);

        let on_buttons = self.focus == Focus::Buttons;
        render_button(
            frame,
            chunks[0],
            self.config.submit_label(),
            on_buttons && self.button == FormButton::Submit,
            Some(Color::Green),
        );
        render_button(
            frame,
            chunks[1],
            self.config.cancel_label(),
            on_buttons && self.button == FormButton::Cancel,
            Some(Color::Gray),
        );
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Cyan);
        let text_style = Style::default().fg(Color::DarkGray);
        let help = Line::from(vec![
            Span::styled("Tab", key_style),
            Span::styled(": next  ", text_style),
            Span::styled("Shift+Tab", key_style),
            Span::styled(": previous  ", text_style),
            Span::styled(SUBMIT_SHORTCUT, key_style),
            Span::styled(": submit  ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(": cancel", text_style),
        ]);
        frame.render_widget(Paragraph::new(help), area);
    }
}

/// Current inline messages for a field
fn messages(bound: &BoundField) -> Vec<String> {
    match bound.clean() {
        Ok(_) => Vec::new(),
        Err(errors) => errors.into_iter().map(|e| e.message).collect(),
    }
}

#[derive(Debug)]
struct FieldRows {
    index: usize,
    header: Option<String>,
    widget: u16,
    messages: u16,
}

impl FieldRows {
    fn height(&self) -> u16 {
        u16::from(self.header.is_some()) + self.widget + self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        Compose, Field, FormData, FormOptions, FormSchema, MockFormHandler,
    };
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn type_str(form: &mut RenderedForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn address_schema() -> Arc<FormSchema> {
        FormSchema::builder("AddressForm")
            .field("street", Field::string().label("Street"))
            .field("city", Field::string().label("City"))
            .build()
    }

    fn contact_schema() -> Arc<FormSchema> {
        FormSchema::builder("ContactForm")
            .field("name", Field::string().label("Name").required())
            .field("age", Field::integer().label("Age").min_value(0).max_value(130))
            .field("newsletter", Field::boolean().label("Newsletter"))
            .field(
                "size",
                Field::choice([("s", "Small"), ("l", "Large")]).label("Size"),
            )
            .build()
    }

    fn screen(form: &RenderedForm, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                form.draw(frame, area);
            })
            .unwrap();
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

    mod widgets {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_one_widget_per_field() {
            let schema = FormSchema::builder("Order")
                .field("email", Field::string())
                .compose("billing", address_schema(), Compose::prefix("billing"))
                .compose("shipping", address_schema(), Compose::prefix("shipping"))
                .build();
            let rendered = Form::new(schema).unwrap().render().unwrap();
            assert_eq!(rendered.widget_count(), 5);
            assert_eq!(rendered.widget_count(), rendered.form().len());
        }

        #[test]
        fn test_widget_per_kind() {
            let rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            assert_eq!(
                rendered.widget_names(),
                vec!["input", "integer_input", "checkbox", "select"]
            );
        }

        #[test]
        fn test_instance_widget_override() {
            let mut form = Form::new(contact_schema()).unwrap();
            form.set_widget("size", "radio").unwrap();
            let rendered = form.render().unwrap();
            assert_eq!(rendered.widget_names()[3], "radio");
        }

        #[test]
        fn test_bad_widget_fails_render() {
            let mut form = Form::new(contact_schema()).unwrap();
            form.set_widget("age", "checkbox").unwrap();
            assert!(matches!(
                form.render(),
                Err(FormError::IncompatibleWidget { field, .. }) if field == "age"
            ));
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_goes_to_focused_field() {
            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            type_str(&mut rendered, "Main St");
            rendered.handle_key(key(KeyCode::Tab));
            type_str(&mut rendered, "Springfield");
            assert_eq!(rendered.raw_value("street").unwrap(), &Value::from("Main St"));
            assert_eq!(rendered.raw_value("city").unwrap(), &Value::from("Springfield"));
        }

        #[test]
        fn test_tab_cycles_through_buttons() {
            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            assert_eq!(rendered.focus(), Focus::Field(0));
            rendered.handle_key(key(KeyCode::Tab));
            rendered.handle_key(key(KeyCode::Tab));
            assert_eq!(rendered.focus(), Focus::Buttons);
            rendered.handle_key(key(KeyCode::Tab));
            assert_eq!(rendered.focus(), Focus::Field(0));
            rendered.handle_key(key(KeyCode::BackTab));
            assert_eq!(rendered.focus(), Focus::Buttons);
        }

        #[test]
        fn test_enter_advances_from_input() {
            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            rendered.handle_key(key(KeyCode::Enter));
            assert_eq!(rendered.focus(), Focus::Field(1));
        }

        #[test]
        fn test_disabled_fields_are_skipped() {
            let schema = FormSchema::builder("Account")
                .field("id", Field::string().initial("42").disabled())
                .field("name", Field::string())
                .build();
            let mut rendered = Form::new(schema).unwrap().render().unwrap();
            assert_eq!(rendered.focus(), Focus::Field(1));
            rendered.handle_key(key(KeyCode::BackTab));
            assert_eq!(rendered.focus(), Focus::Buttons);
        }

        #[test]
        fn test_open_select_keeps_esc() {
            let mut rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            rendered.focus_field("size").unwrap();
            rendered.handle_key(key(KeyCode::Enter));
            assert_eq!(rendered.handle_key(key(KeyCode::Esc)), None);
            assert_eq!(rendered.phase(), FormPhase::Editing);
            // closed now, so Esc cancels
            assert_eq!(rendered.handle_key(key(KeyCode::Esc)), Some(FormEvent::Cancelled));
        }

        #[test]
        fn test_release_events_ignored() {
            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            let mut release = key(KeyCode::Char('x'));
            release.kind = KeyEventKind::Release;
            rendered.handle_key(release);
            assert_eq!(rendered.raw_value("street").unwrap(), &Value::from(""));
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_success() {
            let mut rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            type_str(&mut rendered, "Jane");
            rendered.handle_key(key(KeyCode::Tab));
            type_str(&mut rendered, "30");

            let Some(FormEvent::Submitted(data)) = rendered.handle_key(ctrl_s()) else {
                panic!("expected submission");
            };
            assert_eq!(data["name"], Some(Value::from("Jane")));
            assert_eq!(data["age"], Some(Value::Int(30)));
            assert_eq!(data["size"], None);
            assert_eq!(rendered.phase(), FormPhase::Submitted);
            // finished forms ignore further keys
            assert_eq!(rendered.handle_key(ctrl_s()), None);
        }

        #[test]
        fn test_submit_failure_keeps_form_open() {
            let mut rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            rendered.handle_key(key(KeyCode::Tab));
            type_str(&mut rendered, "131");
            rendered.handle_key(key(KeyCode::Tab));

            assert_eq!(rendered.submit(), None);
            assert_eq!(rendered.phase(), FormPhase::Editing);
            assert_eq!(rendered.notice(), Some(FIX_ERRORS_NOTICE));
            assert_eq!(rendered.errors_for("name").unwrap(), ["Name is required"]);
            assert_eq!(rendered.errors_for("age").unwrap(), ["Must be at most 130"]);
            // focus jumps to the first invalid field
            assert_eq!(rendered.focus(), Focus::Field(0));
        }

        #[test]
        fn test_live_validation_clears_messages() {
            let mut rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            rendered.submit();
            assert!(!rendered.errors_for("name").unwrap().is_empty());
            type_str(&mut rendered, "J");
            assert!(rendered.errors_for("name").unwrap().is_empty());
            assert_eq!(rendered.notice(), None);
        }

        #[test]
        fn test_live_validation_disabled() {
            let config = FormsConfig {
                live_validation: Some(false),
                ..Default::default()
            };
            let mut rendered = Form::new(contact_schema())
                .unwrap()
                .render_with(&WidgetRegistry::default(), config)
                .unwrap();
            rendered.submit();
            type_str(&mut rendered, "J");
            assert_eq!(rendered.errors_for("name").unwrap(), ["Name is required"]);
        }

        #[test]
        fn test_cancel_button() {
            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            rendered.handle_key(key(KeyCode::BackTab));
            assert_eq!(rendered.focus(), Focus::Buttons);
            rendered.handle_key(key(KeyCode::Right));
            assert_eq!(rendered.selected_button(), FormButton::Cancel);
            assert_eq!(rendered.handle_key(key(KeyCode::Enter)), Some(FormEvent::Cancelled));
            assert_eq!(rendered.phase(), FormPhase::Cancelled);
        }

        #[test]
        fn test_reopen_and_render_again() {
            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            type_str(&mut rendered, "Main St");
            rendered.cancel();
            rendered.reopen();
            assert_eq!(rendered.phase(), FormPhase::Editing);

            let again = rendered.into_form().render().unwrap();
            assert_eq!(again.raw_value("street").unwrap(), &Value::from("Main St"));
        }

        #[test]
        fn test_handler_receives_submission() {
            let mut data = FormData::new();
            data.insert("street".into(), Some(Value::from("Main St")));
            data.insert("city".into(), None);
            let expected = data.clone();

            let mut handler = MockFormHandler::new();
            handler
                .expect_on_submitted()
                .withf(move |d| *d == expected)
                .times(1)
                .return_const(());
            handler.expect_on_cancelled().never();

            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            type_str(&mut rendered, "Main St");
            let event = rendered.handle_key_with(ctrl_s(), &mut handler);
            assert_eq!(event, Some(FormEvent::Submitted(data)));
        }

        #[test]
        fn test_handler_receives_cancel() {
            let mut handler = MockFormHandler::new();
            handler.expect_on_cancelled().times(1).return_const(());
            handler.expect_on_submitted().never();

            let mut rendered = Form::new(address_schema()).unwrap().render().unwrap();
            rendered.handle_key_with(key(KeyCode::Esc), &mut handler);
        }
    }

    mod drawing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_draws_labels_and_buttons() {
            let rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            let text = screen(&rendered, 60, 30);
            assert!(text.contains("ContactForm"));
            assert!(text.contains("Name *"));
            assert!(text.contains("Age"));
            assert!(text.contains("Submit"));
            assert!(text.contains("Cancel"));
        }

        #[test]
        fn test_draws_title_and_section_headers() {
            let schema = FormSchema::builder("Order")
                .compose("billing", address_schema(), Compose::prefix("billing"))
                .compose("shipping", address_schema(), Compose::prefix("shipping"))
                .build();
            let form = Form::with_options(
                schema,
                FormOptions {
                    title: Some("Checkout".into()),
                    ..Default::default()
                },
            )
            .unwrap();
            let text = screen(&form.render().unwrap(), 50, 40);
            assert!(text.contains("Checkout"));
            assert!(text.contains("Billing"));
            assert!(text.contains("Shipping"));
        }

        #[test]
        fn test_draws_notice_and_messages() {
            let mut rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            rendered.submit();
            let text = screen(&rendered, 60, 30);
            assert!(text.contains(FIX_ERRORS_NOTICE));
            assert!(text.contains("Name is required"));
        }

        #[test]
        fn test_custom_labels() {
            let config = FormsConfig {
                submit_label: Some("Save".into()),
                cancel_label: Some("Back".into()),
                required_marker: Some("(req)".into()),
                ..Default::default()
            };
            let rendered = Form::new(contact_schema())
                .unwrap()
                .render_with(&WidgetRegistry::default(), config)
                .unwrap();
            let text = screen(&rendered, 60, 30);
            assert!(text.contains("Save"));
            assert!(text.contains("Back"));
            assert!(text.contains("Name (req)"));
        }

        #[test]
        fn test_section_header_once_when_fields_interleave() {
            let schema = FormSchema::builder("Order")
                .field("email", Field::string().label("Email"))
                .compose("billing", address_schema(), Compose::prefix("billing"))
                .build();
            let form = Form::with_options(
                schema,
                FormOptions {
                    field_order: vec![
                        "billing_street".into(),
                        "email".into(),
                        "billing_city".into(),
                    ],
                    ..Default::default()
                },
            )
            .unwrap();
            let text = screen(&form.render().unwrap(), 60, 40);
            assert_eq!(text.matches(" Billing ").count(), 1);
            assert!(text.contains("Email"));
            assert!(text.contains("City"));
        }

        #[test]
        fn test_tall_focused_field_stays_visible() {
            let options: Vec<(String, String)> = (1..=12)
                .map(|i| (format!("o{i}"), format!("Option {i}")))
                .collect();
            let schema = FormSchema::builder("Survey")
                .field("name", Field::string().label("Name"))
                .field("pick", Field::choice(options).label("Pick"))
                .build();
            let mut rendered = Form::new(schema).unwrap().render().unwrap();
            rendered.focus_field("pick").unwrap();
            rendered.handle_key(key(KeyCode::Enter));

            // the open list is taller than the space left for fields
            let text = screen(&rendered, 40, 14);
            assert!(text.contains("Pick"));
            assert!(text.contains("(none)"));
            assert!(!text.contains("Name"));
            assert!(text.contains("Submit"));
        }

        #[test]
        fn test_small_area_does_not_panic() {
            let rendered = Form::new(contact_schema()).unwrap().render().unwrap();
            let _ = screen(&rendered, 20, 8);
        }
    }
}
