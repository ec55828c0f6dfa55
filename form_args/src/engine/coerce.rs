//! Per-kind coercion of raw command-line strings.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::{field::FieldKind, value::Value};

/// Coerces one raw string into the value type of `kind`.
///
/// # Errors
///
/// Returns the message recorded on the field when `raw` does not parse.
pub(crate) fn scalar(kind: &FieldKind, raw: &str) -> Result<Value, &'static str> {
    match kind {
        FieldKind::Integer => raw
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| "Not a valid integer value"),
        FieldKind::Float => raw
            .trim()
            .parse()
            .map(Value::Float)
            .map_err(|_| "Not a valid float value"),
        FieldKind::Decimal => raw
            .trim()
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| "Not a valid decimal value"),
        FieldKind::Date { format } => NaiveDate::parse_from_str(raw, format)
            .map(Value::Date)
            .map_err(|_| "Not a valid date value"),
        FieldKind::DateTime { format } => NaiveDateTime::parse_from_str(raw, format)
            .map(Value::DateTime)
            .map_err(|_| "Not a valid datetime value"),
        FieldKind::Time { format } => NaiveTime::parse_from_str(raw, format)
            .map(Value::Time)
            .map_err(|_| "Not a valid time value"),
        _ => Ok(Value::Str(raw.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::scalar;
    use crate::{FieldSpec, Value};

    #[rstest]
    #[case(FieldSpec::integer(), "42", Value::Int(42))]
    #[case(FieldSpec::integer(), " 7 ", Value::Int(7))]
    #[case(FieldSpec::float(), "4.2", Value::Float(4.2))]
    #[case(FieldSpec::decimal(), " 7.42", Value::Decimal(Decimal::new(742, 2)))]
    #[case(FieldSpec::string(), "baz qux", Value::from("baz qux"))]
    #[case(FieldSpec::select(["foo"]), "foo", Value::from("foo"))]
    #[case(
        FieldSpec::date().format("%Y%m%d"),
        "20161127",
        Value::Date(NaiveDate::from_ymd_opt(2016, 11, 27).expect("date"))
    )]
    #[case(
        FieldSpec::time(),
        "13:52",
        Value::Time(NaiveTime::from_hms_opt(13, 52, 0).expect("time"))
    )]
    fn coerces_valid_input(#[case] spec: FieldSpec, #[case] raw: &str, #[case] expected: Value) {
        assert_eq!(scalar(spec.kind(), raw), Ok(expected));
    }

    #[rstest]
    #[case(FieldSpec::integer(), "baz", "Not a valid integer value")]
    #[case(FieldSpec::float(), "", "Not a valid float value")]
    #[case(FieldSpec::decimal(), "7,42", "Not a valid decimal value")]
    #[case(FieldSpec::date(), "2016/11/27", "Not a valid date value")]
    #[case(FieldSpec::datetime(), "2016-11-27", "Not a valid datetime value")]
    #[case(FieldSpec::time(), "noon", "Not a valid time value")]
    fn reports_invalid_input(#[case] spec: FieldSpec, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(scalar(spec.kind(), raw), Err(expected));
    }
}
