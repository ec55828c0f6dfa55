//! Declarative field types.
//!
//! A [`FieldSpec`] describes one entry of a [`FormSpec`]: its
//! [`FieldKind`], help description, configured default, metavar and
//! validator chain. Specs are cheap to clone and carry no bound data;
//! instantiating a [`crate::Form`] turns them into named fields.

mod default;
mod kind;
mod validators;

use std::{fmt, sync::Arc};

pub use default::{ComputedDefault, DYNAMIC_LABEL, FieldDefault, WellKnownDefault};
pub use kind::{Choice, FieldKind};
pub use validators::{
    FieldInput, InputRequired, Optional, REQUIRED_MESSAGE, ValidationError, Validator,
    ValidatorRole,
};

use crate::form::FormSpec;

/// Default `strftime` format for date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Default `strftime` format for date-time fields.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Default `strftime` format for time fields.
pub const TIME_FORMAT: &str = "%H:%M";

/// Declaration of a single form field.
///
/// # Examples
///
/// ```
/// use form_args::FieldSpec;
///
/// let stars = FieldSpec::integer()
///     .description("customer rating measured in stars")
///     .default(5)
///     .metavar("NUMBER");
/// assert!(!stars.kind().is_multiple());
/// ```
#[derive(Clone)]
pub struct FieldSpec {
    kind: FieldKind,
    description: String,
    default: Option<FieldDefault>,
    metavar: Option<String>,
    validators: Vec<Arc<dyn Validator>>,
}

impl FieldSpec {
    /// Creates a field of the given kind with no description, default or
    /// validators.
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            description: String::new(),
            default: None,
            metavar: None,
            validators: Vec::new(),
        }
    }

    /// Free-form text field.
    #[must_use]
    pub const fn string() -> Self {
        Self::new(FieldKind::String)
    }

    /// Signed integer field.
    #[must_use]
    pub const fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    /// Floating point field.
    #[must_use]
    pub const fn float() -> Self {
        Self::new(FieldKind::Float)
    }

    /// Exact decimal field.
    #[must_use]
    pub const fn decimal() -> Self {
        Self::new(FieldKind::Decimal)
    }

    /// Date field using [`DATE_FORMAT`].
    #[must_use]
    pub fn date() -> Self {
        Self::new(FieldKind::Date {
            format: DATE_FORMAT.to_owned(),
        })
    }

    /// Date-time field using [`DATETIME_FORMAT`].
    #[must_use]
    pub fn datetime() -> Self {
        Self::new(FieldKind::DateTime {
            format: DATETIME_FORMAT.to_owned(),
        })
    }

    /// Time-of-day field using [`TIME_FORMAT`].
    #[must_use]
    pub fn time() -> Self {
        Self::new(FieldKind::Time {
            format: TIME_FORMAT.to_owned(),
        })
    }

    /// Single-choice field. Bare values become `(value, value)` pairs.
    #[must_use]
    pub fn select<I, C>(choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        Self::new(FieldKind::Select {
            choices: choices.into_iter().map(Into::into).collect(),
        })
    }

    /// Multiple-choice field.
    #[must_use]
    pub fn select_multiple<I, C>(choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        Self::new(FieldKind::SelectMultiple {
            choices: choices.into_iter().map(Into::into).collect(),
        })
    }

    /// Ordered list of `entry` fields; each command-line occurrence adds one
    /// entry.
    #[must_use]
    pub fn list(entry: Self) -> Self {
        Self::new(FieldKind::List(Box::new(entry)))
    }

    /// Subform wrapping an entire nested field tree.
    #[must_use]
    pub fn form(spec: FormSpec) -> Self {
        Self::new(FieldKind::Form(spec))
    }

    /// Checkbox-style field. Has no command-line analogue.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    /// Submit button. Has no command-line analogue.
    #[must_use]
    pub const fn submit() -> Self {
        Self::new(FieldKind::Submit)
    }

    /// Sets the help description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the configured default.
    #[must_use]
    pub fn default(mut self, default: impl Into<FieldDefault>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the value placeholder shown in help output.
    #[must_use]
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    /// Replaces the `strftime` format of a date, date-time or time field.
    ///
    /// Has no effect on other kinds.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::Date { format: current }
            | FieldKind::DateTime { format: current }
            | FieldKind::Time { format: current } => *current = format.into(),
            _ => {}
        }
        self
    }

    /// Appends a validator to the chain.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Field kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Help description; empty when none was configured.
    #[must_use]
    pub fn description_text(&self) -> &str {
        &self.description
    }

    /// Configured default, before any override is applied.
    #[must_use]
    pub const fn configured_default(&self) -> Option<&FieldDefault> {
        self.default.as_ref()
    }

    /// Explicit metavar, if any.
    #[must_use]
    pub fn metavar_text(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    /// Declared validators in chain order.
    #[must_use]
    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    /// Validator chain the engine runs.
    ///
    /// Selectable fields receive a leading [`Optional`] unless the chain
    /// already declares [`InputRequired`] or [`Optional`].
    pub(crate) fn effective_validators(&self) -> Vec<Arc<dyn Validator>> {
        let selectable = matches!(
            self.kind,
            FieldKind::Select { .. } | FieldKind::SelectMultiple { .. }
        );
        let declares_presence = self
            .validators
            .iter()
            .any(|validator| validator.role() != ValidatorRole::Rule);
        let mut chain = Vec::with_capacity(self.validators.len() + 1);
        if selectable && !declares_presence {
            chain.push(Arc::new(Optional::new()) as Arc<dyn Validator>);
        }
        chain.extend(self.validators.iter().cloned());
        chain
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("default", &self.default)
            .field("metavar", &self.metavar)
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
