//! Errors raised by the feedback demo.

use thiserror::Error;

/// Result alias for the demo.
pub type Result<T> = std::result::Result<T, FeedbackError>;

/// Failures that stop the demo before or after validation.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Compiling or parsing the form failed.
    #[error(transparent)]
    Form(#[from] form_args::FormError),
    /// Encoding the bound data failed.
    #[error("failed to encode feedback: {0}")]
    Encode(#[from] serde_json::Error),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedbackError {
    /// Returns `true` when `clap` asked to display help or version text.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        matches!(self, Self::Form(err) if form_args::is_display_request(err))
    }
}
