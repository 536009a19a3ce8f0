//! Form rendering module
//!
//! - `field_renderer`: boxed field drawing shared by the widgets
//! - `widgets`: the [`FormWidget`] trait and the built-in widgets
//! - `registry`: widget lookup by name
//! - `rendered_form`: a form on screen with focus, buttons and submission

mod field_renderer;
mod registry;
mod rendered_form;
mod widgets;

pub use field_renderer::{draw_field, text_lines, FieldLook};
pub use registry::{WidgetFactory, WidgetRegistry};
pub use rendered_form::{Focus, FormButton, FormPhase, RenderedForm, FIX_ERRORS_NOTICE};
pub use widgets::{
    Checkbox, DrawContext, FormWidget, RadioSet, Select, TextArea, TextInput, LINE_WIDGET_HEIGHT,
    TEXT_AREA_HEIGHT,
};
