//! Application state and core logic

use crate::demo::{Demo, DEMOS};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tui_forms::ui::components::FormOutcome;
use tui_forms::{Form, FormData, FormHandler, FormsConfig, RenderedForm, WidgetRegistry};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Launcher,
    Form,
    Results,
}

/// Records how a form ended
#[derive(Debug, Default)]
struct OutcomeRecorder {
    title: String,
    outcome: Option<FormOutcome>,
}

impl FormHandler for OutcomeRecorder {
    fn on_submitted(&mut self, data: &FormData) {
        self.outcome = Some(FormOutcome::Submitted {
            title: self.title.clone(),
            data: data.clone(),
            lookups: Vec::new(),
        });
    }

    fn on_cancelled(&mut self) {
        self.outcome = Some(FormOutcome::Cancelled {
            title: self.title.clone(),
        });
    }
}

/// Main application struct
pub struct App {
    pub view: View,
    /// Highlighted launcher entry
    pub selected: usize,
    /// Index into [`DEMOS`] of the open form
    pub active_demo: Option<usize>,
    pub form: Option<RenderedForm>,
    pub outcome: Option<FormOutcome>,
    /// Error queue, shown one at a time
    pub errors: Vec<String>,
    config: FormsConfig,
    registry: WidgetRegistry,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    pub fn new(config: FormsConfig) -> Self {
        Self {
            view: View::Launcher,
            selected: 0,
            active_demo: None,
            form: None,
            outcome: None,
            errors: Vec::new(),
            config,
            registry: WidgetRegistry::with_builtins(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "showing error");
        self.errors.push(message);
    }

    pub fn demos(&self) -> &'static [Demo] {
        DEMOS
    }

    /// Build and render demo `index`
    pub fn open_demo(&mut self, index: usize) {
        let Some(demo) = DEMOS.get(index) else {
            return;
        };
        match (demo.build)().and_then(|form| form.render_with(&self.registry, self.config.clone())) {
            Ok(rendered) => {
                tracing::info!(demo = demo.name, "opened demo");
                self.form = Some(rendered);
                self.active_demo = Some(index);
                self.outcome = None;
                self.view = View::Form;
            }
            Err(err) => self.push_error(format!("Could not open {}: {err}", demo.name)),
        }
    }

    /// Back to the launcher, dropping the form
    pub fn go_back(&mut self) {
        self.form = None;
        self.outcome = None;
        self.active_demo = None;
        self.view = View::Launcher;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }

        // An error dialog swallows keys until dismissed
        if !self.errors.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.errors.remove(0);
            }
            return Ok(());
        }

        match self.view {
            View::Launcher => self.handle_launcher_key(key),
            View::Form => self.handle_form_key(key),
            View::Results => self.handle_results_key(key),
        }
        Ok(())
    }

    fn handle_launcher_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(DEMOS.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % DEMOS.len();
            }
            KeyCode::Enter => self.open_demo(self.selected),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = c.to_digit(10).map_or(0, |d| d as usize);
                if (1..=DEMOS.len()).contains(&index) {
                    self.selected = index - 1;
                    self.open_demo(index - 1);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(demo) = self.active_demo.and_then(|i| DEMOS.get(i)) else {
            self.go_back();
            return;
        };
        let Some(form) = self.form.as_mut() else {
            self.go_back();
            return;
        };

        let mut recorder = OutcomeRecorder {
            title: form
                .form()
                .title()
                .unwrap_or(demo.name)
                .to_string(),
            outcome: None,
        };
        if form.handle_key_with(key, &mut recorder).is_none() {
            return;
        }

        match recorder.outcome {
            Some(FormOutcome::Submitted { title, data, .. }) => {
                if let Some(Err(message)) = demo.check.map(|check| check(&data)) {
                    form.reopen();
                    self.push_error(message);
                    return;
                }
                let lookups = describe_lookups(form.form(), demo.lookups);
                tracing::info!(demo = demo.name, fields = data.len(), "form submitted");
                self.outcome = Some(FormOutcome::Submitted {
                    title,
                    data,
                    lookups,
                });
            }
            Some(cancelled) => {
                tracing::info!(demo = demo.name, "form cancelled");
                self.outcome = Some(cancelled);
            }
            None => return,
        }
        self.view = View::Results;
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => {
                if let Some(index) = self.active_demo {
                    self.open_demo(index);
                }
            }
            KeyCode::Esc | KeyCode::Enter => self.go_back(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }
}

/// What `get_field` finds for each name, for the results dialog
fn describe_lookups(form: &Form, names: &[&str]) -> Vec<(String, String)> {
    names
        .iter()
        .map(|name| {
            let found = match form.get_field(name) {
                Ok(bound) => format!("{} = {} [{}]", bound.name, bound.label(), bound.raw()),
                Err(err) => err.to_string(),
            };
            (name.to_string(), found)
        })
        .collect()
}
