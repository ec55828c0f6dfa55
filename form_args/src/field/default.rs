//! Configured field defaults: concrete values or computed at bind time.

use std::{fmt, sync::Arc};

use chrono::Local;

use crate::value::Value;

/// Computed defaults with a fixed help-text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownDefault {
    /// The current local date.
    Today,
    /// The current local date and time.
    Now,
}

const WELL_KNOWN_LABELS: &[(WellKnownDefault, &str)] = &[
    (WellKnownDefault::Today, "today"),
    (WellKnownDefault::Now, "now"),
];

/// Help-text marker for computed defaults with no known label.
pub const DYNAMIC_LABEL: &str = "dynamic";

impl WellKnownDefault {
    /// Label rendered in help text.
    #[must_use]
    pub fn label(self) -> &'static str {
        WELL_KNOWN_LABELS
            .iter()
            .find_map(|(known, label)| (*known == self).then_some(*label))
            .unwrap_or(DYNAMIC_LABEL)
    }

    fn evaluate(self) -> Value {
        let now = Local::now().naive_local();
        match self {
            Self::Today => Value::Date(now.date()),
            Self::Now => Value::DateTime(now),
        }
    }
}

#[derive(Clone)]
enum DefaultSource {
    WellKnown(WellKnownDefault),
    Function(Arc<dyn Fn() -> Value + Send + Sync>),
}

/// A default evaluated each time the field is processed.
#[derive(Clone)]
pub struct ComputedDefault {
    source: DefaultSource,
    label: Option<String>,
}

impl ComputedDefault {
    /// Evaluates the default.
    #[must_use]
    pub fn evaluate(&self) -> Value {
        match &self.source {
            DefaultSource::WellKnown(known) => known.evaluate(),
            DefaultSource::Function(compute) => compute(),
        }
    }

    /// Human-readable label attached with [`FieldDefault::with_label`].
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Help-text rendering: the well-known label, else the attached label,
    /// else [`DYNAMIC_LABEL`].
    #[must_use]
    pub fn display(&self) -> &str {
        match (&self.source, self.label.as_deref()) {
            (DefaultSource::WellKnown(known), _) => known.label(),
            (DefaultSource::Function(_), Some(label)) => label,
            (DefaultSource::Function(_), None) => DYNAMIC_LABEL,
        }
    }
}

impl fmt::Debug for ComputedDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            DefaultSource::WellKnown(known) => format!("{known:?}"),
            DefaultSource::Function(_) => "<fn>".to_owned(),
        };
        f.debug_struct("ComputedDefault")
            .field("source", &source)
            .field("label", &self.label)
            .finish()
    }
}

/// A field's configured default.
///
/// # Examples
///
/// ```
/// use form_args::{FieldDefault, Value};
///
/// let fixed = FieldDefault::from("foo");
/// assert!(matches!(fixed, FieldDefault::Value(Value::Str(_))));
///
/// let labelled = FieldDefault::computed(|| Value::from("bar")).with_label("always bar");
/// if let FieldDefault::Computed(computed) = labelled {
///     assert_eq!(computed.display(), "always bar");
/// }
/// ```
#[derive(Debug, Clone)]
pub enum FieldDefault {
    /// A fixed value.
    Value(Value),
    /// A value produced when the field is processed.
    Computed(ComputedDefault),
}

impl FieldDefault {
    /// The current local date, rendered as `today` in help text.
    #[must_use]
    pub const fn today() -> Self {
        Self::well_known(WellKnownDefault::Today)
    }

    /// The current local date and time, rendered as `now` in help text.
    #[must_use]
    pub const fn now() -> Self {
        Self::well_known(WellKnownDefault::Now)
    }

    const fn well_known(known: WellKnownDefault) -> Self {
        Self::Computed(ComputedDefault {
            source: DefaultSource::WellKnown(known),
            label: None,
        })
    }

    /// A default computed by `compute`.
    #[must_use]
    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Computed(ComputedDefault {
            source: DefaultSource::Function(Arc::new(compute)),
            label: None,
        })
    }

    /// Attaches a help-text label to a computed default. Fixed values are
    /// returned unchanged.
    #[must_use]
    pub fn with_label(self, label: impl Into<String>) -> Self {
        match self {
            Self::Computed(computed) => Self::Computed(ComputedDefault {
                label: Some(label.into()),
                ..computed
            }),
            fixed @ Self::Value(_) => fixed,
        }
    }

    /// Evaluates the default.
    #[must_use]
    pub fn evaluate(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Computed(computed) => computed.evaluate(),
        }
    }
}

impl<T: Into<Value>> From<T> for FieldDefault {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}
