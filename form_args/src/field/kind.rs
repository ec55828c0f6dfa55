//! Closed set of field categories.

use super::FieldSpec;
use crate::form::FormSpec;

/// A selectable `(value, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value submitted on the command line.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

impl Choice {
    /// Creates a choice with distinct value and label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        Self::new(value.clone(), value)
    }
}

impl From<(&str, &str)> for Choice {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value, label)
    }
}

/// Category of a field. The compiler and the engine dispatch on this enum
/// with a single `match`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum FieldKind {
    /// Free-form text.
    String,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Exact decimal number.
    Decimal,
    /// Calendar date parsed with `format`.
    Date {
        /// `strftime` format string.
        format: String,
    },
    /// Date and time parsed with `format`.
    DateTime {
        /// `strftime` format string.
        format: String,
    },
    /// Time of day parsed with `format`.
    Time {
        /// `strftime` format string.
        format: String,
    },
    /// One value out of `choices`.
    Select {
        /// Allowed choices in display order.
        choices: Vec<Choice>,
    },
    /// Any number of values out of `choices`.
    SelectMultiple {
        /// Allowed choices in display order.
        choices: Vec<Choice>,
    },
    /// Ordered list of entries of the inner field.
    List(Box<FieldSpec>),
    /// Nested subform.
    Form(FormSpec),
    /// Checkbox. Engine-only.
    Boolean,
    /// Submit button. Engine-only.
    Submit,
}

impl FieldKind {
    /// Concrete type name used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::String => "StringField".to_owned(),
            Self::Integer => "IntegerField".to_owned(),
            Self::Float => "FloatField".to_owned(),
            Self::Decimal => "DecimalField".to_owned(),
            Self::Date { .. } => "DateField".to_owned(),
            Self::DateTime { .. } => "DateTimeField".to_owned(),
            Self::Time { .. } => "TimeField".to_owned(),
            Self::Select { .. } => "SelectField".to_owned(),
            Self::SelectMultiple { .. } => "SelectMultipleField".to_owned(),
            Self::List(entry) => format!("FieldList({})", entry.kind().type_name()),
            Self::Form(_) => "FormField".to_owned(),
            Self::Boolean => "BooleanField".to_owned(),
            Self::Submit => "SubmitField".to_owned(),
        }
    }

    /// Returns `true` for kinds holding an ordered sequence of values.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::List(_) | Self::SelectMultiple { .. })
    }

    /// Returns `true` for kinds that may appear as [`FieldKind::List`]
    /// entries on the command line.
    #[must_use]
    pub const fn is_list_entry(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Integer
                | Self::Float
                | Self::Decimal
                | Self::Date { .. }
                | Self::DateTime { .. }
                | Self::Time { .. }
        )
    }

    /// Format string of date/time kinds, looking through list entries.
    #[must_use]
    pub fn temporal_format(&self) -> Option<&str> {
        match self {
            Self::Date { format } | Self::DateTime { format } | Self::Time { format } => {
                Some(format)
            }
            Self::List(entry) => entry.kind().temporal_format(),
            _ => None,
        }
    }

    /// Choices of selectable kinds.
    #[must_use]
    pub fn choices(&self) -> Option<&[Choice]> {
        match self {
            Self::Select { choices } | Self::SelectMultiple { choices } => Some(choices),
            _ => None,
        }
    }
}
