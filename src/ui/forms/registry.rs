//! Widget registry: maps widget names to factories

use super::widgets::{Checkbox, FormWidget, RadioSet, Select, TextArea, TextInput};
use crate::error::{FormError, Result};
use crate::state::{Field, FieldKind};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Builds a fresh widget for a field, or rejects the field
pub type WidgetFactory = Arc<dyn Fn(&Field) -> Result<Box<dyn FormWidget>> + Send + Sync>;

/// Named widget factories, in registration order
#[derive(Clone)]
pub struct WidgetRegistry {
    factories: IndexMap<String, WidgetFactory>,
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("widgets", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn incompatible(widget: &str, field: &Field) -> FormError {
    FormError::IncompatibleWidget {
        widget: widget.to_string(),
        field: field.name.clone(),
        kind: field.kind.name(),
    }
}

impl WidgetRegistry {
    /// No widgets at all
    pub fn empty() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// `input`, `integer_input`, `textarea`, `checkbox`, `select` and `radio`
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("input", |field| match field.kind {
            FieldKind::String { .. } | FieldKind::Text { .. } | FieldKind::Integer { .. } => {
                Ok(Box::new(TextInput::new()) as Box<dyn FormWidget>)
            }
            _ => Err(incompatible("input", field)),
        });
        registry.register("integer_input", |field| match field.kind {
            FieldKind::Integer { .. } => Ok(Box::new(TextInput::integer()) as Box<dyn FormWidget>),
            _ => Err(incompatible("integer_input", field)),
        });
        registry.register("textarea", |field| match field.kind {
            FieldKind::String { .. } | FieldKind::Text { .. } => {
                Ok(Box::new(TextArea::new()) as Box<dyn FormWidget>)
            }
            _ => Err(incompatible("textarea", field)),
        });
        registry.register("checkbox", |field| match field.kind {
            FieldKind::Boolean => Ok(Box::new(Checkbox) as Box<dyn FormWidget>),
            _ => Err(incompatible("checkbox", field)),
        });
        registry.register("select", |field| match field.kind {
            FieldKind::Choice { .. } => Ok(Box::new(Select::new()) as Box<dyn FormWidget>),
            _ => Err(incompatible("select", field)),
        });
        registry.register("radio", |field| match field.kind {
            FieldKind::Choice { .. } => Ok(Box::new(RadioSet::new()) as Box<dyn FormWidget>),
            _ => Err(incompatible("radio", field)),
        });
        registry
    }

    /// Add or replace the factory called `name`
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Field) -> Result<Box<dyn FormWidget>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn get(&self, name: &str) -> Option<&WidgetFactory> {
        self.factories.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build the widget `field` asks for
    pub fn create(&self, field: &Field) -> Result<Box<dyn FormWidget>> {
        let name = field.widget_name();
        let factory = self
            .get(name)
            .ok_or_else(|| FormError::UnknownWidget(name.to_string()))?;
        factory(field)
    }
}
