//! Field definitions: typed slots with conversion and validation rules

use super::validators::{run_all, run_on_empty, BoxedValidator, Validator};
use super::value::Value;
use crate::error::ValidationError;
use std::sync::Arc;

/// One entry of a choice set: `value` is submitted, `label` is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for Choice {
    fn from((value, label): (V, L)) -> Self {
        Choice::new(value, label)
    }
}

/// Type of a field together with its type-specific constraints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Integer {
        min_value: Option<i64>,
        max_value: Option<i64>,
    },
    Boolean,
    Choice {
        choices: Vec<Choice>,
    },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String { .. } => "string",
            FieldKind::Text { .. } => "text",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Choice { .. } => "choice",
        }
    }

    /// Registry name of the widget used when no override is given
    pub fn default_widget(&self) -> &'static str {
        match self {
            FieldKind::String { .. } => "input",
            FieldKind::Text { .. } => "textarea",
            FieldKind::Integer { .. } => "integer_input",
            FieldKind::Boolean => "checkbox",
            FieldKind::Choice { .. } => "select",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::Text { .. })
    }
}

/// Declaration of one form input
///
/// Built with the constructor for its kind and refined with the chained
/// setters. Setters for constraints that do not apply to the kind (for
/// example `min_value` on a string field) leave the field unchanged.
#[derive(Debug, Clone)]
pub struct Field {
    /// Assigned when the field is declared on a schema and replaced by the
    /// fully-qualified name once bound to a form instance
    pub name: String,
    pub label: Option<String>,
    pub required: bool,
    pub initial: Option<Value>,
    pub help_text: Option<String>,
    pub disabled: bool,
    pub kind: FieldKind,
    pub validators: Vec<BoxedValidator>,
    /// Registry name of an alternative widget
    pub widget: Option<String>,
}

impl Field {
    fn of_kind(kind: FieldKind) -> Self {
        Self {
            name: String::new(),
            label: None,
            required: false,
            initial: None,
            help_text: None,
            disabled: false,
            kind,
            validators: Vec::new(),
            widget: None,
        }
    }

    /// Single-line text
    pub fn string() -> Self {
        Self::of_kind(FieldKind::String {
            min_length: None,
            max_length: None,
        })
    }

    /// Multi-line text
    pub fn text() -> Self {
        Self::of_kind(FieldKind::Text {
            min_length: None,
            max_length: None,
        })
    }

    pub fn integer() -> Self {
        Self::of_kind(FieldKind::Integer {
            min_value: None,
            max_value: None,
        })
    }

    pub fn boolean() -> Self {
        Self::of_kind(FieldKind::Boolean)
    }

    pub fn choice<C: Into<Choice>>(choices: impl IntoIterator<Item = C>) -> Self {
        Self::of_kind(FieldKind::Choice {
            choices: choices.into_iter().map(Into::into).collect(),
        })
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    pub fn help_text(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Render with the registry widget called `name` instead of the default
    pub fn widget(mut self, name: impl Into<String>) -> Self {
        self.widget = Some(name.into());
        self
    }

    /// Turn a string field into a multi-line text field
    pub fn multiline(mut self) -> Self {
        if let FieldKind::String {
            min_length,
            max_length,
        } = self.kind
        {
            self.kind = FieldKind::Text {
                min_length,
                max_length,
            };
        }
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        if let FieldKind::String { min_length, .. } | FieldKind::Text { min_length, .. } =
            &mut self.kind
        {
            *min_length = Some(n);
        }
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        if let FieldKind::String { max_length, .. } | FieldKind::Text { max_length, .. } =
            &mut self.kind
        {
            *max_length = Some(n);
        }
        self
    }

    pub fn min_value(mut self, n: i64) -> Self {
        if let FieldKind::Integer { min_value, .. } = &mut self.kind {
            *min_value = Some(n);
        }
        self
    }

    pub fn max_value(mut self, n: i64) -> Self {
        if let FieldKind::Integer { max_value, .. } = &mut self.kind {
            *max_value = Some(n);
        }
        self
    }

    /// Label if set, else the field name
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Widget registry name to render this field with
    pub fn widget_name(&self) -> &str {
        self.widget
            .as_deref()
            .unwrap_or_else(|| self.kind.default_widget())
    }

    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            FieldKind::Choice { choices } => choices,
            _ => &[],
        }
    }

    /// Convert a raw (widget) value into the native value.
    /// Empty input becomes `None`, except for booleans.
    pub fn to_native(&self, raw: &Value) -> Result<Option<Value>, ValidationError> {
        match &self.kind {
            FieldKind::String { .. } | FieldKind::Text { .. } | FieldKind::Choice { .. } => {
                let text = raw.to_text();
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::Str(trimmed.to_string())))
                }
            }
            FieldKind::Integer { .. } => match raw {
                Value::Int(n) => Ok(Some(Value::Int(*n))),
                Value::Str(s) if s.trim().is_empty() => Ok(None),
                Value::Str(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(|n| Some(Value::Int(n)))
                    .map_err(|_| {
                        ValidationError::with_code(format!("Invalid integer: {s}"), "invalid")
                    }),
                Value::Bool(b) => Err(ValidationError::with_code(
                    format!("Invalid integer: {b}"),
                    "invalid",
                )),
            },
            FieldKind::Boolean => Ok(Some(Value::Bool(to_bool(raw)))),
        }
    }

    /// Convert a native value into what the widget holds
    pub fn to_external(&self, native: Option<&Value>) -> Value {
        match (&self.kind, native) {
            (FieldKind::Boolean, Some(v)) => Value::Bool(to_bool(v)),
            (FieldKind::Boolean, None) => Value::Bool(false),
            (_, Some(v)) => Value::Str(v.to_text()),
            (_, None) => Value::Str(String::new()),
        }
    }

    /// Check a converted value: required-ness, kind constraints, then every
    /// validator. All failures are returned.
    pub fn validate(&self, value: Option<&Value>) -> Vec<ValidationError> {
        let Some(value) = value else {
            if self.required {
                return vec![ValidationError::with_code(
                    format!("{} is required", self.display_name()),
                    "required",
                )];
            }
            return run_on_empty(&self.validators);
        };

        let mut errors = self.check_kind(value);
        errors.extend(run_all(&self.validators, value));
        errors
    }

    /// Convert then validate. Conversion failure skips the validators.
    pub fn clean(&self, raw: &Value) -> Result<Option<Value>, Vec<ValidationError>> {
        let native = self.to_native(raw).map_err(|e| vec![e])?;
        let errors = self.validate(native.as_ref());
        if errors.is_empty() {
            Ok(native)
        } else {
            Err(errors)
        }
    }

    /// Raw value a fresh widget starts with
    pub fn initial_raw(&self) -> Value {
        self.to_external(self.initial.as_ref())
    }

    fn check_kind(&self, value: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match &self.kind {
            FieldKind::String {
                min_length,
                max_length,
            }
            | FieldKind::Text {
                min_length,
                max_length,
            } => {
                let len = value.to_text().chars().count();
                if let Some(min) = min_length.filter(|min| len < *min) {
                    errors.push(ValidationError::with_code(
                        format!("Must be at least {min} characters"),
                        "min_length",
                    ));
                }
                if let Some(max) = max_length.filter(|max| len > *max) {
                    errors.push(ValidationError::with_code(
                        format!("Must be at most {max} characters"),
                        "max_length",
                    ));
                }
            }
            FieldKind::Integer {
                min_value,
                max_value,
            } => {
                if let Some(n) = value.as_int() {
                    if let Some(min) = min_value.filter(|min| n < *min) {
                        errors.push(ValidationError::with_code(
                            format!("Must be at least {min}"),
                            "min_value",
                        ));
                    }
                    if let Some(max) = max_value.filter(|max| n > *max) {
                        errors.push(ValidationError::with_code(
                            format!("Must be at most {max}"),
                            "max_value",
                        ));
                    }
                }
            }
            FieldKind::Boolean => {}
            FieldKind::Choice { choices } => {
                let text = value.to_text();
                if !choices.iter().any(|c| c.value == text) {
                    errors.push(ValidationError::with_code(
                        format!("Select a valid choice. {text} is not one of the available choices."),
                        "invalid_choice",
                    ));
                }
            }
        }
        errors
    }
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(n) => *n != 0,
        Value::Str(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "1" | "on"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::validators::{EmailValidator, EvenInteger, Required};

    fn messages(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    mod string_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_creation() {
            let field = Field::string().label("Test").required();
            assert_eq!(field.label.as_deref(), Some("Test"));
            assert!(field.required);
            assert_eq!(field.widget_name(), "input");
        }

        #[test]
        fn test_to_native() {
            let field = Field::string();
            assert_eq!(field.to_native(&"hello".into()).unwrap(), Some("hello".into()));
            assert_eq!(field.to_native(&"  hello  ".into()).unwrap(), Some("hello".into()));
            assert_eq!(field.to_native(&"".into()).unwrap(), None);
        }

        #[test]
        fn test_to_external() {
            let field = Field::string();
            assert_eq!(field.to_external(Some(&"hello".into())), Value::from("hello"));
            assert_eq!(field.to_external(None), Value::from(""));
        }

        #[test]
        fn test_multiline_switches_to_text() {
            let field = Field::string().max_length(5).multiline();
            assert_eq!(
                field.kind,
                FieldKind::Text {
                    min_length: None,
                    max_length: Some(5)
                }
            );
            assert_eq!(field.widget_name(), "textarea");
        }

        #[test]
        fn test_length_constraints() {
            let field = Field::string().min_length(2).max_length(4);
            assert!(field.clean(&"abc".into()).is_ok());
            let errors = field.clean(&"a".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["Must be at least 2 characters"]);
            let errors = field.clean(&"abcde".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["Must be at most 4 characters"]);
        }

        #[test]
        fn test_optional_empty_skips_constraints() {
            let field = Field::string().min_length(2);
            assert_eq!(field.clean(&"".into()), Ok(None));
        }
    }

    mod text_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_is_multiline() {
            let field = Field::text();
            assert!(field.kind.is_multiline());
            assert_eq!(field.widget_name(), "textarea");
        }

        #[test]
        fn test_keeps_inner_newlines() {
            let field = Field::text();
            assert_eq!(
                field.to_native(&"line one\nline two\n".into()).unwrap(),
                Some("line one\nline two".into())
            );
        }
    }

    mod integer_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_to_native() {
            let field = Field::integer();
            assert_eq!(field.to_native(&"42".into()).unwrap(), Some(Value::Int(42)));
            assert_eq!(field.to_native(&Value::Int(42)).unwrap(), Some(Value::Int(42)));
            assert_eq!(field.to_native(&" 7 ".into()).unwrap(), Some(Value::Int(7)));
            assert_eq!(field.to_native(&"".into()).unwrap(), None);
        }

        #[test]
        fn test_to_native_invalid() {
            let field = Field::integer();
            let err = field.to_native(&"not a number".into()).unwrap_err();
            assert_eq!(err.message, "Invalid integer: not a number");
            assert_eq!(err.code.as_deref(), Some("invalid"));
        }

        #[test]
        fn test_range_is_inclusive() {
            let field = Field::integer().min_value(0).max_value(130);
            assert_eq!(field.clean(&"0".into()), Ok(Some(Value::Int(0))));
            assert_eq!(field.clean(&"130".into()), Ok(Some(Value::Int(130))));
            assert_eq!(
                messages(&field.clean(&"-1".into()).unwrap_err()),
                vec!["Must be at least 0"]
            );
            assert_eq!(
                messages(&field.clean(&"131".into()).unwrap_err()),
                vec!["Must be at most 130"]
            );
        }

        #[test]
        fn test_collects_range_and_validator_failures() {
            let field = Field::integer()
                .min_value(18)
                .validator(EvenInteger::default());
            let errors = field.clean(&"15".into()).unwrap_err();
            assert_eq!(
                messages(&errors),
                vec!["Must be at least 18", "Must be an even number"]
            );
        }

        #[test]
        fn test_conversion_failure_skips_validators() {
            let field = Field::integer().validator(EvenInteger::default());
            let errors = field.clean(&"abc".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["Invalid integer: abc"]);
        }

        #[test]
        fn test_to_external_is_text() {
            let field = Field::integer();
            assert_eq!(field.to_external(Some(&Value::Int(30))), Value::from("30"));
            assert_eq!(field.to_external(None), Value::from(""));
        }
    }

    mod boolean_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_to_native() {
            let field = Field::boolean();
            let cases: [(Value, bool); 8] = [
                (true.into(), true),
                (false.into(), false),
                ("true".into(), true),
                ("yes".into(), true),
                ("ON".into(), true),
                ("false".into(), false),
                (1.into(), true),
                (0.into(), false),
            ];
            for (raw, expected) in cases {
                assert_eq!(
                    field.to_native(&raw).unwrap(),
                    Some(Value::Bool(expected)),
                    "{raw:?}"
                );
            }
        }

        #[test]
        fn test_required_boolean_accepts_false() {
            let field = Field::boolean().required();
            assert_eq!(field.clean(&false.into()), Ok(Some(Value::Bool(false))));
        }

        #[test]
        fn test_to_external() {
            let field = Field::boolean();
            assert_eq!(field.to_external(Some(&"yes".into())), Value::Bool(true));
            assert_eq!(field.to_external(None), Value::Bool(false));
            assert_eq!(field.widget_name(), "checkbox");
        }
    }

    mod choice_field {
        use super::*;
        use pretty_assertions::assert_eq;

        fn countries() -> Field {
            Field::choice([("us", "United States"), ("uk", "United Kingdom")])
        }

        #[test]
        fn test_creation() {
            let field = countries();
            assert_eq!(
                field.choices(),
                &[
                    Choice::new("us", "United States"),
                    Choice::new("uk", "United Kingdom")
                ]
            );
            assert_eq!(field.widget_name(), "select");
        }

        #[test]
        fn test_declared_value_returns_value_not_label() {
            let field = countries();
            assert_eq!(field.clean(&"us".into()), Ok(Some("us".into())));
        }

        #[test]
        fn test_undeclared_value_rejected() {
            let field = countries();
            let errors = field.clean(&"United States".into()).unwrap_err();
            assert_eq!(errors[0].code.as_deref(), Some("invalid_choice"));
            assert!(field.clean(&"fr".into()).is_err());
        }

        #[test]
        fn test_empty_is_none() {
            assert_eq!(countries().clean(&"".into()), Ok(None));
        }

        #[test]
        fn test_widget_override() {
            let field = countries().widget("radio");
            assert_eq!(field.widget_name(), "radio");
        }
    }

    mod required {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_uses_label() {
            let field = Field::string().label("Name").required();
            let errors = field.clean(&"   ".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["Name is required"]);
        }

        #[test]
        fn test_required_falls_back_to_name() {
            let mut field = Field::integer().required();
            field.name = "age".into();
            let errors = field.clean(&"".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["age is required"]);
        }

        #[test]
        fn test_required_validator_rejects_empty_field() {
            let field = Field::string().validator(Required::default());
            let errors = field.clean(&"  ".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["This field is required"]);
            assert_eq!(field.clean(&"nick".into()).unwrap(), Some("nick".into()));
        }

        #[test]
        fn test_empty_optional_skips_other_validators() {
            let field = Field::string().validator(EmailValidator::default());
            assert_eq!(field.clean(&"".into()).unwrap(), None);
        }

        #[test]
        fn test_required_flag_wins_over_validator() {
            let field = Field::string()
                .label("Nick")
                .required()
                .validator(Required::default());
            let errors = field.clean(&"".into()).unwrap_err();
            assert_eq!(messages(&errors), vec!["Nick is required"]);
        }

        #[test]
        fn test_inapplicable_constraint_is_ignored() {
            let field = Field::string().min_value(3);
            assert_eq!(
                field.kind,
                FieldKind::String {
                    min_length: None,
                    max_length: None
                }
            );
        }

        #[test]
        fn test_initial_raw() {
            assert_eq!(Field::integer().initial(5).initial_raw(), Value::from("5"));
            assert_eq!(Field::boolean().initial(true).initial_raw(), Value::Bool(true));
            assert_eq!(Field::string().initial_raw(), Value::from(""));
        }
    }
}
