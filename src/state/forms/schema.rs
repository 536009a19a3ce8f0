//! Form schemas: the static, ordered description of a form type
//!
//! A schema lists field declarations and composed sub-forms in declaration
//! order. It is built once per form type (see [`FormType`]) and shared by
//! every instance. Name resolution and collision checks happen when a
//! [`Form`](super::Form) is constructed from it.

use super::field::Field;
use super::form_state::{Form, FormOptions};
use crate::error::Result;
use std::sync::Arc;

/// How a sub-form is pulled into its parent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compose {
    pub prefix: String,
    pub title: Option<String>,
}

impl Compose {
    /// Fields keep their own names
    pub fn unprefixed() -> Self {
        Self::default()
    }

    /// Fields become `<prefix>_<name>`
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            title: None,
        }
    }

    /// Section title shown above the sub-form's fields
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Explicit title, else the capitalized prefix, else none
    pub fn resolved_title(&self) -> Option<String> {
        if self.title.is_some() {
            return self.title.clone();
        }
        let mut chars = self.prefix.chars();
        chars.next().map(|first| {
            first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect()
        })
    }
}

/// A sub-form included in a parent schema
#[derive(Debug, Clone)]
pub struct Composition {
    /// Declaration name in the parent
    pub name: String,
    pub schema: Arc<FormSchema>,
    pub prefix: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Field(Field),
    Composed(Composition),
}

/// Where a field came from when it was pulled in by composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub composed_from: String,
    pub prefix: String,
    /// Name inside the composed schema
    pub original_name: String,
    pub title: Option<String>,
}

/// A field after composition, named relative to the schema that expanded it
#[derive(Debug, Clone)]
pub(crate) struct ExpandedField {
    pub name: String,
    pub field: Field,
    pub section: Option<Section>,
}

/// Ordered declarations of one form type
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    name: String,
    declarations: Vec<Declaration>,
}

impl FormSchema {
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            schema: FormSchema {
                name: name.into(),
                declarations: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Fields declared directly on this schema, without composed ones
    pub fn declared_fields(&self) -> impl Iterator<Item = &Field> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Field(field) => Some(field),
            Declaration::Composed(_) => None,
        })
    }

    /// Flatten compositions, applying prefixes, in declaration order.
    /// Duplicates are kept; the form rejects them.
    pub(crate) fn expand(&self) -> Vec<ExpandedField> {
        let mut out = Vec::new();
        for declaration in &self.declarations {
            match declaration {
                Declaration::Field(field) => out.push(ExpandedField {
                    name: field.name.clone(),
                    field: field.clone(),
                    section: None,
                }),
                Declaration::Composed(composition) => {
                    let tracked = !composition.prefix.is_empty() || composition.title.is_some();
                    for inner in composition.schema.expand() {
                        let section = if tracked {
                            Some(Section {
                                composed_from: composition.name.clone(),
                                prefix: composition.prefix.clone(),
                                original_name: inner.name.clone(),
                                title: composition.title.clone(),
                            })
                        } else {
                            inner.section
                        };
                        out.push(ExpandedField {
                            name: qualify(&composition.prefix, &inner.name),
                            field: inner.field,
                            section,
                        });
                    }
                }
            }
        }
        out
    }
}

/// Join a prefix and a name with `_`; an empty prefix adds nothing
pub fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}_{name}")
    }
}

pub struct FormSchemaBuilder {
    schema: FormSchema,
}

impl FormSchemaBuilder {
    /// Declare a field under `name`
    pub fn field(mut self, name: impl Into<String>, mut field: Field) -> Self {
        field.name = name.into();
        self.schema.declarations.push(Declaration::Field(field));
        self
    }

    /// Include every field of `schema`, named per `compose`
    pub fn compose(
        mut self,
        name: impl Into<String>,
        schema: Arc<FormSchema>,
        compose: Compose,
    ) -> Self {
        let title = compose.resolved_title();
        self.schema
            .declarations
            .push(Declaration::Composed(Composition {
                name: name.into(),
                schema,
                prefix: compose.prefix,
                title,
            }));
        self
    }

    pub fn build(self) -> Arc<FormSchema> {
        Arc::new(self.schema)
    }
}

/// A form type with a cached schema
///
/// ```ignore
/// struct AddressForm;
///
/// impl FormType for AddressForm {
///     fn schema() -> Arc<FormSchema> {
///         static SCHEMA: Lazy<Arc<FormSchema>> = Lazy::new(|| {
///             FormSchema::builder("AddressForm")
///                 .field("street", Field::string().label("Street"))
///                 .field("city", Field::string().label("City"))
///                 .build()
///         });
///         SCHEMA.clone()
///     }
/// }
/// ```
pub trait FormType {
    fn schema() -> Arc<FormSchema>;

    fn form() -> Result<Form> {
        Form::new(Self::schema())
    }

    fn form_with(options: FormOptions) -> Result<Form> {
        Form::with_options(Self::schema(), options)
    }
}
