//! Validator chain primitives.
//!
//! Rule validators (length, range, pattern) belong to callers; this module
//! provides the trait, the outcome type and the two flow-control validators
//! the engine itself relies on.

use thiserror::Error;

use crate::value::Value;

/// Snapshot of a field handed to each validator.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    /// Hierarchical field name.
    pub name: &'a str,
    /// Raw command-line strings; `None` when the form was processed without
    /// form data.
    pub raw: Option<&'a [String]>,
    /// Coerced data, if coercion succeeded.
    pub data: Option<&'a Value>,
}

impl FieldInput<'_> {
    /// Returns `true` when no raw input was supplied, or the first raw value
    /// is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raw
            .and_then(<[String]>::first)
            .is_none_or(|first| first.trim().is_empty())
    }
}

/// Outcome of a failed validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Records the message and continues with the next validator.
    #[error("{0}")]
    Invalid(String),
    /// Records the message, if any, and stops the chain.
    #[error("{}", .0.as_deref().unwrap_or_default())]
    Stop(Option<String>),
    /// Clears every error recorded so far and stops the chain.
    #[error("validation skipped")]
    Skip,
}

/// How a validator participates in presence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorRole {
    /// Ordinary rule.
    Rule,
    /// Demands input ([`InputRequired`]).
    Required,
    /// Tolerates missing input ([`Optional`]).
    Optional,
}

/// A link in a field's validator chain.
///
/// Closures with the matching signature implement the trait:
///
/// ```
/// use form_args::{FieldInput, FieldSpec, ValidationError, Value};
///
/// let stars = FieldSpec::integer().validator(|input: &FieldInput<'_>| {
///     match input.data {
///         Some(Value::Int(n)) if !(1..=5).contains(n) => Err(ValidationError::Invalid(
///             "number must be between 1 and 5".to_owned(),
///         )),
///         _ => Ok(()),
///     }
/// });
/// assert_eq!(stars.validators().len(), 1);
/// ```
pub trait Validator: Send + Sync {
    /// Checks the field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the failure and how the
    /// chain proceeds.
    fn validate(&self, input: &FieldInput<'_>) -> Result<(), ValidationError>;

    /// Role in presence checks; ordinary rules keep the default.
    fn role(&self) -> ValidatorRole {
        ValidatorRole::Rule
    }
}

impl<F> Validator for F
where
    F: Fn(&FieldInput<'_>) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, input: &FieldInput<'_>) -> Result<(), ValidationError> {
        self(input)
    }
}

/// Message recorded by [`InputRequired`] unless overridden.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Stops the chain with an error when no input was supplied.
#[derive(Debug, Clone, Default)]
pub struct InputRequired {
    message: Option<String>,
}

impl InputRequired {
    /// Uses [`REQUIRED_MESSAGE`].
    #[must_use]
    pub const fn new() -> Self {
        Self { message: None }
    }

    /// Uses a custom message.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl Validator for InputRequired {
    fn validate(&self, input: &FieldInput<'_>) -> Result<(), ValidationError> {
        if input.is_blank() {
            let message = self.message.as_deref().unwrap_or(REQUIRED_MESSAGE);
            return Err(ValidationError::Stop(Some(message.to_owned())));
        }
        Ok(())
    }

    fn role(&self) -> ValidatorRole {
        ValidatorRole::Required
    }
}

/// Clears earlier errors and stops the chain when no input was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional;

impl Optional {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Validator for Optional {
    fn validate(&self, input: &FieldInput<'_>) -> Result<(), ValidationError> {
        if input.is_blank() {
            return Err(ValidationError::Skip);
        }
        Ok(())
    }

    fn role(&self) -> ValidatorRole {
        ValidatorRole::Optional
    }
}
