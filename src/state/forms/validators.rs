//! Reusable value validators
//!
//! Validators see non-empty native values, except those that report
//! [`Validator::checks_empty`], which also run on an empty field. A field
//! runs every validator it holds and keeps every failure.

use super::value::Value;
use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

static SIMPLE_EMAIL_PAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@.+\..+").expect("email pattern compiles"));

/// A stateless rule applied to one value
pub trait Validator: fmt::Debug + Send + Sync {
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;

    /// Whether an empty field is checked too, as an empty string
    fn checks_empty(&self) -> bool {
        false
    }
}

/// Shared handle so one validator can sit on many fields
pub type BoxedValidator = Arc<dyn Validator>;

fn fail(custom: &Option<String>, default: impl FnOnce() -> String) -> ValidationError {
    ValidationError::new(custom.clone().unwrap_or_else(default))
}

/// Rejects blank strings
#[derive(Debug, Clone, Default)]
pub struct Required {
    pub message: Option<String>,
}

impl Validator for Required {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_blank() {
            return Err(fail(&self.message, || "This field is required".into()));
        }
        Ok(())
    }

    fn checks_empty(&self) -> bool {
        true
    }
}

/// Minimum length of the text form, in characters
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min_length: usize,
    pub message: Option<String>,
}

impl MinLength {
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            message: None,
        }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.to_text().chars().count() < self.min_length {
            return Err(fail(&self.message, || {
                format!("Must be at least {} characters", self.min_length)
            }));
        }
        Ok(())
    }
}

/// Maximum length of the text form, in characters
#[derive(Debug, Clone)]
pub struct MaxLength {
    pub max_length: usize,
    pub message: Option<String>,
}

impl MaxLength {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: None,
        }
    }
}

impl Validator for MaxLength {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.to_text().chars().count() > self.max_length {
            return Err(fail(&self.message, || {
                format!("Must be at most {} characters", self.max_length)
            }));
        }
        Ok(())
    }
}

/// Inclusive lower bound for integers; other values pass
#[derive(Debug, Clone)]
pub struct MinValue {
    pub min_value: i64,
    pub message: Option<String>,
}

impl MinValue {
    pub fn new(min_value: i64) -> Self {
        Self {
            min_value,
            message: None,
        }
    }
}

impl Validator for MinValue {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_int() {
            Some(n) if n < self.min_value => Err(fail(&self.message, || {
                format!("Must be at least {}", self.min_value)
            })),
            _ => Ok(()),
        }
    }
}

/// Inclusive upper bound for integers; other values pass
#[derive(Debug, Clone)]
pub struct MaxValue {
    pub max_value: i64,
    pub message: Option<String>,
}

impl MaxValue {
    pub fn new(max_value: i64) -> Self {
        Self {
            max_value,
            message: None,
        }
    }
}

impl Validator for MaxValue {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_int() {
            Some(n) if n > self.max_value => Err(fail(&self.message, || {
                format!("Must be at most {}", self.max_value)
            })),
            _ => Ok(()),
        }
    }
}

/// Text must match a regular expression somewhere
#[derive(Debug, Clone)]
pub struct Pattern {
    pub regex: Regex,
    pub message: Option<String>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: None,
        })
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for Pattern {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if !self.regex.is_match(&value.to_text()) {
            return Err(fail(&self.message, || {
                format!("Must match the pattern {}", self.regex.as_str())
            }));
        }
        Ok(())
    }
}

/// Loose email check: rejects addresses like `user@name` without a TLD
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    pub message: Option<String>,
}

impl Validator for EmailValidator {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let text = value.to_text();
        if text.is_empty() || !SIMPLE_EMAIL_PAT.is_match(&text) {
            return Err(fail(&self.message, || "Must be a valid email address".into()));
        }
        Ok(())
    }
}

/// Integers must be even. Text that parses as an integer is checked too;
/// anything else passes and is left to the field's own conversion.
#[derive(Debug, Clone, Default)]
pub struct EvenInteger {
    pub message: Option<String>,
}

impl Validator for EvenInteger {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let n = match value {
            Value::Int(n) => *n,
            Value::Str(s) => match s.trim().parse::<i64>() {
                Ok(n) => n,
                Err(_) => return Ok(()),
            },
            Value::Bool(_) => return Ok(()),
        };
        if n % 2 != 0 {
            return Err(fail(&self.message, || "Must be an even number".into()));
        }
        Ok(())
    }
}

/// Text must read the same backwards
#[derive(Debug, Clone, Default)]
pub struct Palindromic {
    pub message: Option<String>,
}

impl Validator for Palindromic {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let text = value.to_text();
        if !text.chars().eq(text.chars().rev()) {
            return Err(fail(&self.message, || "Must be a palindrome".into()));
        }
        Ok(())
    }
}

type CheckFn = dyn Fn(&Value) -> Result<(), String> + Send + Sync;

/// Ad hoc rule from a closure returning the failure reason
pub struct Custom {
    name: String,
    check: Box<CheckFn>,
}

impl Custom {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish()
    }
}

impl Validator for Custom {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        (self.check)(value).map_err(ValidationError::new)
    }
}

/// Run every validator and collect all failures
pub fn run_all(validators: &[BoxedValidator], value: &Value) -> Vec<ValidationError> {
    validators
        .iter()
        .filter_map(|v| v.validate(value).err())
        .collect()
}

/// Run the validators that check empty fields against an empty value
pub fn run_on_empty(validators: &[BoxedValidator]) -> Vec<ValidationError> {
    let empty = Value::Str(String::new());
    validators
        .iter()
        .filter(|v| v.checks_empty())
        .filter_map(|v| v.validate(&empty).err())
        .collect()
}
