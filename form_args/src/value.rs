//! Typed field values shared by the default resolver, the validation engine
//! and the rendered form data.

use std::fmt::{self, Write as _};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// A coerced field datum.
///
/// Values serialize untagged, so [`crate::Form::data`] renders strings and
/// numbers as plain JSON scalars and dates in ISO 8601. Decimals serialize
/// as strings to keep their exact digits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Free-form text.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Exact decimal number.
    Decimal(Decimal),
    /// Boolean flag.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time without a time zone.
    DateTime(NaiveDateTime),
    /// Time of day.
    Time(NaiveTime),
    /// Ordered sequence of values.
    List(Vec<Value>),
}

impl Value {
    /// Converts a JSON scalar or array into a [`Value`].
    ///
    /// `null` and objects have no field-level equivalent and yield `None`;
    /// array members that cannot be converted are dropped.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null | serde_json::Value::Object(_) => None,
            serde_json::Value::Bool(flag) => Some(Self::Bool(*flag)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float)),
            serde_json::Value::String(text) => Some(Self::Str(text.clone())),
            serde_json::Value::Array(items) => {
                Some(Self::List(items.iter().filter_map(Self::from_json).collect()))
            }
        }
    }

    /// Returns `true` for dates, date-times and times.
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date(_) | Self::DateTime(_) | Self::Time(_))
    }

    /// Renders a temporal value with a `strftime`-style format string.
    ///
    /// Returns `None` for non-temporal values or when the format string
    /// contains specifiers the value cannot satisfy (for example `%H` on a
    /// plain date).
    #[must_use]
    pub fn format_temporal(&self, format: &str) -> Option<String> {
        match self {
            Self::Date(date) => render(date.format(format)),
            Self::DateTime(datetime) => render(datetime.format(format)),
            Self::Time(time) => render(time.format(format)),
            _ => None,
        }
    }

    /// Returns the text when this is a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }
}

fn render(formatted: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}

/// Renders `datetime` with `format`, falling back to `None` on an invalid
/// format string instead of panicking inside `Display`.
pub(crate) fn format_datetime(datetime: &NaiveDateTime, format: &str) -> Option<String> {
    render(datetime.format(format))
}

/// Wraps `text` in double quotes when it contains internal whitespace.
pub(crate) fn quote_spaced(text: &str) -> String {
    if text.split_whitespace().nth(1).is_some() {
        format!("\"{text}\"")
    } else {
        text.to_owned()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(text),
            Self::Int(number) => write!(f, "{number}"),
            // Debug keeps the trailing `.0` of whole numbers.
            Self::Float(number) => write!(f, "{number:?}"),
            Self::Decimal(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
            Self::Time(time) => write!(f, "{}", time.format("%H:%M:%S")),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{Value, quote_spaced};

    #[rstest]
    #[case(json!("foo"), Some(Value::Str("foo".into())))]
    #[case(json!(7), Some(Value::Int(7)))]
    #[case(json!(7.5), Some(Value::Float(7.5)))]
    #[case(json!(true), Some(Value::Bool(true)))]
    #[case(json!(null), None)]
    #[case(json!({"nested": 1}), None)]
    #[case(json!(["a", null, 2]), Some(Value::List(vec![Value::Str("a".into()), Value::Int(2)])))]
    fn converts_json(#[case] input: serde_json::Value, #[case] expected: Option<Value>) {
        assert_eq!(Value::from_json(&input), expected);
    }

    #[test]
    fn formats_temporal_values() {
        let date = NaiveDate::from_ymd_opt(2016, 11, 27).expect("valid date");
        let value = Value::from(date);
        assert_eq!(value.format_temporal("%Y%m%d").as_deref(), Some("20161127"));
        assert_eq!(value.to_string(), "2016-11-27");
    }

    #[test]
    fn unsatisfiable_format_yields_none() {
        let time = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
        assert_eq!(Value::from(time).format_temporal("%Y"), None);
        assert_eq!(Value::from("x").format_temporal("%Y"), None);
    }

    #[rstest]
    #[case("foo", "foo")]
    #[case("baz qux", "\"baz qux\"")]
    #[case("  padded  ", "  padded  ")]
    fn quotes_only_internal_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote_spaced(input), expected);
    }

    #[rstest]
    #[case(Value::Float(7.0), "7.0")]
    #[case(Value::Float(7.42), "7.42")]
    #[case(Value::Int(7), "7")]
    #[case(Value::Decimal(Decimal::new(742, 2)), "7.42")]
    #[case(Value::Decimal(Decimal::new(70, 1)), "7.0")]
    fn renders_numbers(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn decimals_serialize_as_exact_strings() {
        let value = Value::Decimal(Decimal::new(742, 2));
        assert_eq!(serde_json::to_value(&value).expect("serialize"), json!("7.42"));
    }

    #[test]
    fn serializes_untagged() {
        let value = Value::from(vec!["x", "y"]);
        assert_eq!(serde_json::to_value(&value).expect("serialize"), json!(["x", "y"]));
    }
}
