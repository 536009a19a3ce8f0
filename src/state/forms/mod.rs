//! Form domain layer
//!
//! Fields, validators and schemas describe a form type once; a [`Form`]
//! instance resolves names, holds values and produces cleaned data. Nothing
//! here depends on the terminal.

mod field;
mod form_state;
mod schema;
pub mod validators;
mod value;

pub use field::{Choice, Field, FieldKind};
pub use form_state::{BoundField, Form, FormEvent, FormHandler, FormOptions, IntoValue};
pub use schema::{qualify, Compose, Composition, Declaration, FormSchema, FormSchemaBuilder, FormType, Section};
pub use validators::{BoxedValidator, Validator};
pub use value::{FormData, Value};

#[cfg(test)]
pub use form_state::MockFormHandler;
