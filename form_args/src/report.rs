//! Error reporting.
//!
//! One line per recorded error, depth-first in declaration order:
//! `<name>: [<echoed input>: ]<message>`. Names are shown with `_` rendered
//! as `-` (matching the long flag) and messages start lower-case.

use std::io::{self, Write};

use crate::{
    form::{Field, Form, Node},
    parser::{ParsedArgs, flatten_name},
};

/// Collects the report lines of `form`.
#[must_use]
pub fn error_lines(form: &Form) -> Vec<String> {
    let mut lines = Vec::new();
    collect(form, form.args(), &mut lines);
    lines
}

/// Writes the report lines of `form` to `out`, one per line.
///
/// # Errors
///
/// Returns any I/O error raised by `out`.
pub fn report<W: Write + ?Sized>(form: &Form, out: &mut W) -> io::Result<()> {
    for line in error_lines(form) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn collect(form: &Form, args: Option<&dyn ParsedArgs>, lines: &mut Vec<String>) {
    for node in form.nodes() {
        match node {
            Node::Field(field) => {
                let echo = echoed_input(field, args);
                let name = field.name().replace('_', "-");
                lines.extend(field.errors().iter().map(|message| {
                    let text = lower_first(message);
                    echo.as_ref().map_or_else(
                        || format!("{name}: {text}"),
                        |input| format!("{name}: {input}: {text}"),
                    )
                }));
            }
            Node::Form(subform) => collect(subform.form(), args, lines),
        }
    }
}

fn echoed_input(field: &Field, args: Option<&dyn ParsedArgs>) -> Option<String> {
    if field.is_multiple() {
        return None;
    }
    args?.value(&flatten_name(field.name()))
}

fn lower_first(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

impl Form {
    /// Report lines for every recorded error.
    #[must_use]
    pub fn error_lines(&self) -> Vec<String> {
        error_lines(self)
    }

    /// Writes one line per recorded error to `out`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `out`.
    pub fn print_errors<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        report(self, out)
    }
}
