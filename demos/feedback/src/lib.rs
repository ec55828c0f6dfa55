//! Feedback form demo.
//!
//! Compiles a small nested feedback form into a `clap` command, resolves
//! defaults from `feedback.toml` and `FEEDBACK_*` environment variables, and
//! prints either the bound form data as JSON or one line per validation
//! error.

pub mod config;
pub mod error;
pub mod form;

use std::{ffi::OsString, io::Write};

use clap::Command;
use form_args::Form;
use tracing::debug;

use crate::error::Result;

/// Name shown in usage output.
pub const PROGRAM: &str = "feedback";

/// Outcome of a run that got as far as validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The form validated and its data was written to `out`.
    Accepted,
    /// Validation failed and the errors were written to `errors`.
    Rejected,
}

/// Parses `argv`, binds it to the feedback form and reports the result.
///
/// # Errors
///
/// Returns [`error::FeedbackError`] when the form cannot be compiled,
/// `clap` rejects `argv` (including `--help`), or writing output fails.
pub fn run<I, T, O, E>(argv: I, overrides: form_args::Overrides, out: &mut O, errors: &mut E) -> Result<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let spec = form::feedback_form();
    let mut feedback = Form::with_overrides(&spec, overrides);
    let command = Command::new(PROGRAM).about("Record a piece of feedback.");
    if !feedback.parse_from(command, argv)? {
        debug!(count = feedback.error_lines().len(), "feedback rejected");
        feedback.print_errors(errors)?;
        return Ok(Outcome::Rejected);
    }
    serde_json::to_writer_pretty(&mut *out, &feedback.data())?;
    writeln!(out)?;
    Ok(Outcome::Accepted)
}
