//! Primary error enum for form compilation and parsing flows.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type FormResult<T> = Result<T, FormError>;

/// Errors that abort compiling or parsing a form.
///
/// Per-field validation failures are not represented here; they are
/// collected on the owning field and surfaced through
/// [`crate::Form::print_errors`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormError {
    /// A field or subform name collides with the single-letter short flag
    /// namespace.
    #[error("field names must be at least two characters long: '{name}'")]
    FieldNameTooShort {
        /// Offending hierarchical field name.
        name: String,
    },

    /// The short-argument table names a subform rather than a leaf field.
    #[error("cannot assign a short argument to a FormField: -{short} -> {name}")]
    ShortArgumentAssignedToComposite {
        /// Subform that received the letter.
        name: String,
        /// Letter assigned by the short-argument table.
        short: char,
    },

    /// The field kind has no command-line analogue.
    #[error("unsupported field type: {type_name} (field '{name}')")]
    UnsupportedFieldType {
        /// Concrete type name of the field, for example `SubmitField`.
        type_name: String,
        /// Hierarchical name of the field.
        name: String,
    },

    /// The short-argument table claims a letter the parser keeps for itself.
    #[error("reserved short argument '-{short}' cannot be assigned to '{name}'")]
    ReservedShortArgument {
        /// Field that received the letter.
        name: String,
        /// Reserved letter.
        short: char,
    },

    /// The field's long flag collides with a flag the parser provides.
    #[error("reserved long argument '--{long}' cannot be used by '{name}'")]
    ReservedLongArgument {
        /// Hierarchical field name.
        name: String,
        /// Reserved long flag, without dashes.
        long: String,
    },

    /// Two fields flatten to the same long flag and destination.
    #[error("duplicate argument '--{long}': '{name}' collides with '{existing}'")]
    DuplicateArgument {
        /// Field registered second.
        name: String,
        /// Field that registered the flag first.
        existing: String,
        /// Shared long flag, without dashes.
        long: String,
    },

    /// Error parsing command-line arguments.
    #[error("failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),
}

impl From<clap::Error> for FormError {
    fn from(error: clap::Error) -> Self {
        Self::CliParsing(Box::new(error))
    }
}
