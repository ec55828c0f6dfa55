//! Help-text assembly for a single leaf argument.

use chrono::NaiveDate;

use crate::{
    defaults::ResolvedDefault,
    field::FieldSpec,
    value::{format_datetime, quote_spaced},
};

/// Moment rendered as the worked example for date/time formats.
const EXAMPLE_MOMENT: (i32, u32, u32, u32, u32, u32) = (2017, 11, 27, 13, 52, 41);

/// Builds the help text of a leaf: description, format note, choices note,
/// repeatability note and default note, each only when applicable.
pub(crate) fn help_text(spec: &FieldSpec, resolved: &ResolvedDefault) -> String {
    let kind = spec.kind();
    let mut parts = Vec::new();
    if !spec.description_text().is_empty() {
        parts.push(spec.description_text().to_owned());
    }
    if let Some(format) = kind.temporal_format() {
        parts.push(format_note(format));
    }
    if let Some(choices) = kind.choices() {
        let values: Vec<_> = choices
            .iter()
            .map(|choice| quote_spaced(&choice.value))
            .collect();
        parts.push(format!("(choices: {})", values.join(", ")));
    }
    if kind.is_multiple() {
        parts.push("(may be supplied multiple times)".to_owned());
    } else if let Some(default) = resolved.display(kind) {
        parts.push(format!("(default: {default})"));
    }
    parts.join(" ")
}

fn format_note(format: &str) -> String {
    let (year, month, day, hour, minute, second) = EXAMPLE_MOMENT;
    let example = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .and_then(|moment| format_datetime(&moment, format));
    match example {
        Some(example) => format!(
            "(format: {}, example: {})",
            quote_spaced(format),
            quote_spaced(&example)
        ),
        None => format!("(format: {})", quote_spaced(format)),
    }
}
