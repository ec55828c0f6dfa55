//! Unit tests for field declarations.

use rstest::rstest;

use super::{Choice, FieldKind, FieldSpec, InputRequired, Optional, ValidatorRole};
use crate::form::FormSpec;

fn roles(spec: &FieldSpec) -> Vec<ValidatorRole> {
    spec.effective_validators()
        .iter()
        .map(|validator| validator.role())
        .collect()
}

#[test]
fn bare_choices_become_pairs() {
    let spec = FieldSpec::select(["foo", "bar", "baz"]);
    let expected = vec![
        Choice::new("foo", "foo"),
        Choice::new("bar", "bar"),
        Choice::new("baz", "baz"),
    ];
    assert_eq!(spec.kind().choices(), Some(expected.as_slice()));
}

#[test]
fn labelled_choices_keep_labels() {
    let spec = FieldSpec::select_multiple([("s", "small"), ("l", "large")]);
    let choices = spec.kind().choices().expect("selectable kind");
    assert_eq!(choices.first().map(|c| c.label.as_str()), Some("small"));
}

#[rstest]
#[case(FieldSpec::select(["a"]), vec![ValidatorRole::Optional])]
#[case(FieldSpec::select(["a"]).validator(Optional::new()), vec![ValidatorRole::Optional])]
#[case(FieldSpec::select(["a"]).validator(InputRequired::new()), vec![ValidatorRole::Required])]
#[case(FieldSpec::select_multiple(["a"]), vec![ValidatorRole::Optional])]
#[case(
    FieldSpec::select_multiple(["a"]).validator(InputRequired::new()),
    vec![ValidatorRole::Required]
)]
#[case(FieldSpec::string(), vec![])]
fn selectable_fields_default_to_optional(
    #[case] spec: FieldSpec,
    #[case] expected: Vec<ValidatorRole>,
) {
    assert_eq!(roles(&spec), expected);
}

#[rstest]
#[case(FieldSpec::date().format("%Y%m%d"), Some("%Y%m%d"))]
#[case(FieldSpec::datetime(), Some("%Y-%m-%d %H:%M:%S"))]
#[case(FieldSpec::time(), Some("%H:%M"))]
#[case(FieldSpec::list(FieldSpec::date()), Some("%Y-%m-%d"))]
#[case(FieldSpec::string().format("%Y"), None)]
fn exposes_temporal_formats(#[case] spec: FieldSpec, #[case] expected: Option<&str>) {
    assert_eq!(spec.kind().temporal_format(), expected);
}

#[rstest]
#[case(FieldSpec::submit(), "SubmitField")]
#[case(FieldSpec::boolean(), "BooleanField")]
#[case(FieldSpec::list(FieldSpec::integer()), "FieldList(IntegerField)")]
#[case(FieldSpec::form(FormSpec::new()), "FormField")]
fn names_concrete_types(#[case] spec: FieldSpec, #[case] expected: &str) {
    assert_eq!(spec.kind().type_name(), expected);
}

#[test]
fn multiplicity_covers_lists_and_multi_selects() {
    assert!(FieldSpec::list(FieldSpec::string()).kind().is_multiple());
    assert!(FieldSpec::select_multiple(["a"]).kind().is_multiple());
    assert!(!FieldSpec::select(["a"]).kind().is_multiple());
    assert!(matches!(FieldSpec::string().kind(), FieldKind::String));
}

#[test]
fn metavar_is_stored() {
    let spec = FieldSpec::float().metavar("FOO").description("help");
    assert_eq!(spec.metavar_text(), Some("FOO"));
    assert_eq!(spec.description_text(), "help");
}
