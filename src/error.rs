//! Error types for form configuration, lookup and validation

use thiserror::Error;

/// A single rejected value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub code: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

/// All messages reported for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Fully-qualified field name
    pub field: String,
    pub messages: Vec<String>,
}

/// Aggregate of every field that failed validation, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn push(&mut self, field: impl Into<String>, messages: Vec<String>) {
        self.violations.push(FieldViolation {
            field: field.into(),
            messages,
        });
    }

    /// Messages reported for `field`, if it failed
    pub fn for_field(&self, field: &str) -> Option<&[String]> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

/// "2 fields failed validation; name: ...; age: ..."
fn summarize(violations: &[FieldViolation]) -> String {
    let count = violations.len();
    let mut out = format!(
        "{count} field{} failed validation",
        if count == 1 { "" } else { "s" }
    );
    for violation in violations {
        out.push_str(&format!("; {}: {}", violation.field, violation.messages.join(", ")));
    }
    out
}

/// Errors raised by form construction, lookup, rendering and data access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Field name collision: '{0}' is defined multiple times. Use different prefixes to avoid collisions.")]
    NameCollision(String),

    #[error("Field '{name}' is ambiguous. Could be: {}. Use the full qualified name to disambiguate.", candidates.join(", "))]
    AmbiguousField {
        name: String,
        candidates: Vec<String>,
    },

    #[error("No field named '{0}'")]
    FieldNotFound(String),

    #[error("Unknown widget '{0}'")]
    UnknownWidget(String),

    #[error("Widget '{widget}' cannot render {kind} field '{field}'")]
    IncompatibleWidget {
        widget: String,
        field: String,
        kind: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_with_code() {
        let err = ValidationError::with_code("Test error", "test_code");
        assert_eq!(err.message, "Test error");
        assert_eq!(err.code.as_deref(), Some("test_code"));
        assert_eq!(err.to_string(), "Test error");
    }

    #[test]
    fn test_validation_error_without_code() {
        let err = ValidationError::new("Test error");
        assert!(err.code.is_none());
    }

    #[test]
    fn test_collision_message() {
        let err = FormError::NameCollision("street".into());
        assert!(err.to_string().contains("Field name collision"));
        assert!(err.to_string().contains("'street'"));
    }

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = FormError::AmbiguousField {
            name: "street".into(),
            candidates: vec!["billing_street".into(), "shipping_street".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("ambiguous"));
        assert!(msg.contains("billing_street, shipping_street"));
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::default();
        errors.push("name", vec!["Name is required".into()]);
        errors.push("age", vec!["Must be at least 0".into(), "Must be an even number".into()]);

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "2 fields failed validation; name: Name is required; \
             age: Must be at least 0, Must be an even number"
        );
        assert_eq!(errors.for_field("age").map(<[String]>::len), Some(2));
        assert!(errors.for_field("email").is_none());
    }

    #[test]
    fn test_validation_errors_display_single_field() {
        let mut errors = ValidationErrors::default();
        errors.push("nick", vec!["This field is required".into()]);
        assert_eq!(
            errors.to_string(),
            "1 field failed validation; nick: This field is required"
        );
        let source: &dyn std::error::Error = &errors;
        assert!(source.source().is_none());
    }

    #[test]
    fn test_validation_converts_into_form_error() {
        let mut errors = ValidationErrors::default();
        errors.push("name", vec!["Name is required".into()]);
        let err: FormError = errors.clone().into();
        assert_eq!(err, FormError::Validation(errors));
    }
}
