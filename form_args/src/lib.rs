//! Compile nested, typed form declarations into a `clap` argument surface and
//! bind the parsed values back into the form tree for validation.
//!
//! A [`FormSpec`] declares fields and subforms. [`Form::new`] instantiates it
//! into a tree whose leaves carry hierarchical names (`xxx-b_bb-value`).
//! [`compile`] registers one flag per leaf with any [`ArgumentParser`]
//! (`clap::Command` included); after parsing, [`Form::bind_and_validate`]
//! rebuilds the hierarchical form data, runs the validation engine and
//! [`Form::print_errors`] reports failures.
//!
//! ```
//! use clap::Command;
//! use form_args::{FieldSpec, Form, FormSpec};
//!
//! let comment = FormSpec::new().field("name", FieldSpec::string());
//! let spec = FormSpec::new()
//!     .field("stars", FieldSpec::integer().default(5))
//!     .field("comment", FieldSpec::form(comment));
//!
//! let mut form = Form::new(&spec);
//! let valid = form.parse_from(
//!     Command::new("feedback"),
//!     ["feedback", "--comment-name", "Ada"],
//! )?;
//! assert!(valid);
//! assert_eq!(form.data()["comment"]["name"], "Ada");
//! assert_eq!(form.data()["stars"], 5);
//! # Ok::<(), form_args::FormError>(())
//! ```

mod bind;
mod compile;
mod defaults;
mod engine;
mod error;
mod field;
mod form;
mod multidict;
mod parser;
mod report;
mod value;

pub use bind::{bind, bind_args, populate, populate_into, reinsert_separators};
pub use compile::{
    ArgumentAction, ArgumentParser, ArgumentSpec, CompileOptions, ShortArguments, compile,
};
pub use defaults::{
    LookupFn, ObjectLookup, Overrides, ResolvedDefault, SeedData, SeedEntry, resolve,
};
pub use error::{FormError, FormResult, is_display_request};
pub use field::{
    Choice, ComputedDefault, DATE_FORMAT, DATETIME_FORMAT, DYNAMIC_LABEL, FieldDefault,
    FieldInput, FieldKind, FieldSpec, InputRequired, Optional, REQUIRED_MESSAGE, TIME_FORMAT,
    ValidationError, Validator, ValidatorRole, WellKnownDefault,
};
pub use form::{Field, Form, FormSpec, Node, SEPARATOR, ShortArgumentsFn, Subform};
pub use multidict::{MultiValue, Multidict, SENTINEL_KEY};
pub use parser::{FLAT_SEPARATOR, ParsedArgs, flatten_name};
pub use report::{error_lines, report};
pub use value::Value;
