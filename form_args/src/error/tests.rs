//! Unit tests for error classification and rendering.

use clap::{Command, error::ErrorKind};
use rstest::rstest;

use super::{FormError, is_display_request};

fn build_error(kind: ErrorKind) -> FormError {
    Command::new("demo").error(kind, "demo output").into()
}

#[rstest]
#[case(ErrorKind::DisplayHelp)]
#[case(ErrorKind::DisplayVersion)]
fn recognises_display_requests(#[case] kind: ErrorKind) {
    assert!(is_display_request(&build_error(kind)));
}

#[rstest]
#[case(ErrorKind::UnknownArgument)]
#[case(ErrorKind::InvalidValue)]
fn rejects_regular_errors(#[case] kind: ErrorKind) {
    assert!(!is_display_request(&build_error(kind)));
}

#[test]
fn compile_errors_are_never_display_requests() {
    let err = FormError::FieldNameTooShort { name: "a".into() };
    assert!(!is_display_request(&err));
}

#[rstest]
#[case(
    FormError::FieldNameTooShort { name: "a".into() },
    "field names must be at least two characters"
)]
#[case(
    FormError::ShortArgumentAssignedToComposite { name: "child".into(), short: 'c' },
    "cannot assign a short argument to a FormField"
)]
#[case(
    FormError::UnsupportedFieldType { type_name: "SubmitField".into(), name: "submit".into() },
    "unsupported field type: SubmitField"
)]
#[case(
    FormError::ReservedShortArgument { name: "help_me".into(), short: 'h' },
    "reserved short argument '-h'"
)]
#[case(
    FormError::ReservedLongArgument { name: "help".into(), long: "help".into() },
    "reserved long argument '--help'"
)]
#[case(
    FormError::DuplicateArgument {
        name: "ab-cd".into(),
        existing: "ab_cd".into(),
        long: "ab-cd".into(),
    },
    "duplicate argument '--ab-cd': 'ab-cd' collides with 'ab_cd'"
)]
fn renders_messages(#[case] err: FormError, #[case] expected: &str) {
    let rendered = err.to_string();
    assert!(rendered.contains(expected), "unexpected message: {rendered}");
}
