//! Error types produced while compiling a form into an argument surface.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{FormError, FormResult};

#[cfg(test)]
mod tests;
