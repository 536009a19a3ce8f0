//! tui-forms - declarative forms for terminal user interfaces
//!
//! Forms are described once as a [`FormSchema`] of typed [`Field`]s and
//! composed sub-forms, instantiated as a [`Form`] that resolves fully
//! qualified names and moves data in and out, and drawn with ratatui as a
//! [`RenderedForm`] that reports [`FormEvent`]s.
//!
//! ```ignore
//! let schema = FormSchema::builder("Contact")
//!     .field("name", Field::string().label("Name").required())
//!     .compose("home", PhoneForm::schema(), Compose::prefix("home"))
//!     .build();
//! let mut form = Form::new(schema)?;
//! form.set_data([("name", "Jane"), ("home_phone", "555-1234")]);
//! let data = form.get_data()?;
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod state;
pub mod ui;

pub use config::FormsConfig;
pub use error::{FormError, Result, ValidationError, ValidationErrors};
pub use state::{
    validators, BoundField, Choice, Compose, Field, FieldKind, Form, FormData, FormEvent,
    FormHandler, FormOptions, FormSchema, FormType, Section, Validator, Value,
};
pub use ui::forms::{RenderedForm, WidgetRegistry};
