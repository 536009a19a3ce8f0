//! Form instances: name resolution, lookup and data flow

use super::field::Field;
use super::schema::{qualify, FormSchema, Section};
use super::value::{FormData, Value};
use crate::error::{FormError, Result, ValidationError, ValidationErrors};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Anything `set_data` accepts as a field value
pub trait IntoValue {
    fn into_value(self) -> Option<Value>;
}

impl IntoValue for Value {
    fn into_value(self) -> Option<Value> {
        Some(self)
    }
}

impl IntoValue for Option<Value> {
    fn into_value(self) -> Option<Value> {
        self
    }
}

impl IntoValue for &Value {
    fn into_value(self) -> Option<Value> {
        Some(self.clone())
    }
}

impl IntoValue for &Option<Value> {
    fn into_value(self) -> Option<Value> {
        self.clone()
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Option<Value> {
        Some(Value::from(self))
    }
}

impl IntoValue for String {
    fn into_value(self) -> Option<Value> {
        Some(Value::Str(self))
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Option<Value> {
        Some(Value::Int(self))
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Option<Value> {
        Some(Value::Bool(self))
    }
}

/// A field bound to one form instance, with its current raw value
#[derive(Debug, Clone)]
pub struct BoundField {
    /// Fully-qualified name
    pub name: String,
    pub field: Field,
    pub section: Option<Section>,
    raw: Value,
}

impl BoundField {
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut Value {
        &mut self.raw
    }

    pub fn set_raw(&mut self, raw: Value) {
        self.raw = raw;
    }

    /// Push a native value through the field's conversion into the widget value
    pub fn set_value(&mut self, native: Option<&Value>) {
        self.raw = self.field.to_external(native);
    }

    /// Current value converted, without running validators
    pub fn value(&self) -> std::result::Result<Option<Value>, ValidationError> {
        self.field.to_native(&self.raw)
    }

    pub fn clean(&self) -> std::result::Result<Option<Value>, Vec<ValidationError>> {
        self.field.clean(&self.raw)
    }

    pub fn label(&self) -> &str {
        self.field.display_name()
    }

    /// Restore the declared initial value
    pub fn reset(&mut self) {
        self.raw = self.field.initial_raw();
    }
}

/// Construction options for a [`Form`]
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// Prepended to every field name, as when nested in a parent
    pub prefix: Option<String>,
    /// Initial values keyed by fully-qualified name
    pub data: Option<FormData>,
    pub title: Option<String>,
    /// Fully-qualified names to move to the front, in this order
    pub field_order: Vec<String>,
}

/// One form instance built from a schema
#[derive(Debug, Clone)]
pub struct Form {
    schema: Arc<FormSchema>,
    title: Option<String>,
    prefix: Option<String>,
    fields: Vec<BoundField>,
    by_name: HashMap<String, usize>,
    by_suffix: HashMap<String, Vec<usize>>,
}

impl Form {
    pub fn new(schema: Arc<FormSchema>) -> Result<Self> {
        Self::with_options(schema, FormOptions::default())
    }

    /// Resolve fully-qualified names, reject collisions, apply ordering and
    /// initial data
    pub fn with_options(schema: Arc<FormSchema>, options: FormOptions) -> Result<Self> {
        let prefix = options.prefix.filter(|p| !p.is_empty());

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for expanded in schema.expand() {
            let name = match &prefix {
                Some(prefix) => qualify(prefix, &expanded.name),
                None => expanded.name,
            };
            if !seen.insert(name.clone()) {
                tracing::debug!(form = schema.name(), field = %name, "field name collision");
                return Err(FormError::NameCollision(name));
            }
            let mut field = expanded.field;
            field.name = name.clone();
            let raw = field.initial_raw();
            fields.push(BoundField {
                name,
                field,
                section: expanded.section,
                raw,
            });
        }

        order_fields(&mut fields, &options.field_order);

        let mut form = Self {
            by_name: HashMap::new(),
            by_suffix: HashMap::new(),
            schema,
            title: options.title,
            prefix,
            fields,
        };
        form.build_index();

        if let Some(data) = &options.data {
            form.set_data(data);
        }

        tracing::debug!(
            form = form.schema.name(),
            fields = form.fields.len(),
            "form constructed"
        );
        Ok(form)
    }

    fn build_index(&mut self) {
        self.by_name.clear();
        self.by_suffix.clear();
        for (index, bound) in self.fields.iter().enumerate() {
            self.by_name.insert(bound.name.clone(), index);
            for (pos, _) in bound.name.match_indices('_') {
                let suffix = &bound.name[pos + 1..];
                if !suffix.is_empty() {
                    self.by_suffix
                        .entry(suffix.to_string())
                        .or_default()
                        .push(index);
                }
            }
        }
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn fields(&self) -> &[BoundField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fully-qualified names in field order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn field_at(&self, index: usize) -> Option<&BoundField> {
        self.fields.get(index)
    }

    pub fn field_at_mut(&mut self, index: usize) -> Option<&mut BoundField> {
        self.fields.get_mut(index)
    }

    /// Index of the field `name` refers to: an exact fully-qualified name,
    /// else the single field whose name ends with `_<name>`
    pub fn resolve(&self, name: &str) -> Result<usize> {
        if let Some(&index) = self.by_name.get(name) {
            return Ok(index);
        }
        match self.by_suffix.get(name).map(Vec::as_slice) {
            None | Some([]) => Err(FormError::FieldNotFound(name.to_string())),
            Some([index]) => Ok(*index),
            Some(indices) => {
                let mut candidates: Vec<String> = indices
                    .iter()
                    .map(|&i| self.fields[i].name.clone())
                    .collect();
                candidates.sort();
                Err(FormError::AmbiguousField {
                    name: name.to_string(),
                    candidates,
                })
            }
        }
    }

    pub fn get_field(&self, name: &str) -> Result<&BoundField> {
        let index = self.resolve(name)?;
        Ok(&self.fields[index])
    }

    pub fn get_field_mut(&mut self, name: &str) -> Result<&mut BoundField> {
        let index = self.resolve(name)?;
        Ok(&mut self.fields[index])
    }

    pub fn raw_value(&self, name: &str) -> Result<&Value> {
        self.get_field(name).map(BoundField::raw)
    }

    pub fn set_raw(&mut self, name: &str, raw: impl Into<Value>) -> Result<()> {
        self.get_field_mut(name)?.set_raw(raw.into());
        Ok(())
    }

    /// Swap the widget used for one field on this instance only
    pub fn set_widget(&mut self, name: &str, widget: impl Into<String>) -> Result<()> {
        self.get_field_mut(name)?.field.widget = Some(widget.into());
        Ok(())
    }

    /// Push values into the fields through their external conversion.
    /// Keys must be fully-qualified; unknown keys are skipped.
    pub fn set_data<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: IntoValue,
    {
        for (name, value) in data {
            let name = name.as_ref();
            match self.by_name.get(name) {
                Some(&index) => {
                    let value = value.into_value();
                    self.fields[index].set_value(value.as_ref());
                }
                None => {
                    tracing::warn!(form = self.schema.name(), field = name, "ignoring unknown field");
                }
            }
        }
    }

    /// Clean every field. Fails with every violation if any field is invalid.
    pub fn get_data(&self) -> Result<FormData> {
        self.clean_all().map_err(FormError::Validation)
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        self.clean_all().map(|_| ())
    }

    fn clean_all(&self) -> std::result::Result<FormData, ValidationErrors> {
        let mut data = FormData::with_capacity(self.fields.len());
        let mut errors = ValidationErrors::default();
        for bound in &self.fields {
            match bound.clean() {
                Ok(value) => {
                    data.insert(bound.name.clone(), value);
                }
                Err(violations) => {
                    errors.push(
                        bound.name.clone(),
                        violations.into_iter().map(|v| v.message).collect(),
                    );
                }
            }
        }
        if errors.is_empty() {
            Ok(data)
        } else {
            tracing::debug!(form = self.schema.name(), %errors, "form data rejected");
            Err(errors)
        }
    }

    /// Distinct titled sections in field order
    pub fn sections(&self) -> Vec<&Section> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .filter_map(|f| f.section.as_ref())
            .filter(|s| s.title.is_some() && seen.insert(s.composed_from.as_str()))
            .collect()
    }

    /// Restore every field to its declared initial value
    pub fn reset(&mut self) {
        for bound in &mut self.fields {
            bound.reset();
        }
    }
}

fn order_fields(fields: &mut Vec<BoundField>, order: &[String]) {
    if order.is_empty() {
        return;
    }
    let mut rest = std::mem::take(fields);
    for name in order {
        if let Some(pos) = rest.iter().position(|f| &f.name == name) {
            fields.push(rest.remove(pos));
        }
    }
    fields.append(&mut rest);
}

/// Outcome of one interaction cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submitted(FormData),
    Cancelled,
}

impl FormEvent {
    pub fn dispatch(&self, handler: &mut dyn FormHandler) {
        match self {
            FormEvent::Submitted(data) => handler.on_submitted(data),
            FormEvent::Cancelled => handler.on_cancelled(),
        }
    }
}

/// Receives form outcomes
#[cfg_attr(test, mockall::automock)]
pub trait FormHandler {
    fn on_submitted(&mut self, data: &FormData);
    fn on_cancelled(&mut self);
}
