//! Helpers for classifying parser errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::FormError;

/// Returns `true` when a [`FormError`] wraps a `--help` or `--version`
/// request rather than a genuine parse failure.
///
/// Entry points that call [`crate::Form::parse_from`] use this to delegate to
/// [`clap::Error::exit`] and keep the zero exit status of help output.
#[must_use]
pub fn is_display_request(err: &FormError) -> bool {
    match err {
        FormError::CliParsing(clap_error) => is_display_kind(clap_error),
        _ => false,
    }
}

fn is_display_kind(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}
