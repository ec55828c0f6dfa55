//! Nested subforms, short arguments and compile-time failures.

use anyhow::Result;
use form_args::{CompileOptions, FieldSpec, FormError, FormSpec, Overrides, ShortArguments};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::Harness;

#[fixture]
fn parent() -> FormSpec {
    let grandchild = FormSpec::new().field("value", FieldSpec::string());
    let child = FormSpec::new()
        .field("aaa", FieldSpec::form(grandchild.clone()))
        .field("b_bb", FieldSpec::form(grandchild.clone()))
        .field("c_c_c", FieldSpec::form(grandchild));
    FormSpec::new()
        .field("xxx", FieldSpec::form(child.clone()))
        .field("y_yy", FieldSpec::form(child.clone()))
        .field("z_z_z", FieldSpec::form(child))
}

const PARENTS: [(&str, &str); 3] = [("xxx", "x"), ("y_yy", "y"), ("z_z_z", "z")];
const CHILDREN: [(&str, &str); 3] = [("aaa", "a"), ("b_bb", "b"), ("c_c_c", "c")];

fn tree(leaf: impl Fn(&str, &str) -> serde_json::Value) -> serde_json::Value {
    let parents = PARENTS
        .iter()
        .map(|(parent, p)| {
            let children = CHILDREN
                .iter()
                .map(|(child, c)| ((*child).to_owned(), json!({ "value": leaf(p, c) })))
                .collect();
            ((*parent).to_owned(), serde_json::Value::Object(children))
        })
        .collect();
    serde_json::Value::Object(parents)
}

#[rstest]
fn nested_forms_round_trip(parent: FormSpec) -> Result<()> {
    let harness = Harness::new(parent)?;
    let mut argv = Vec::new();
    for (parent_name, p) in PARENTS {
        for (child_name, c) in CHILDREN {
            let long = format!("{parent_name}-{child_name}-value").replace('_', "-");
            assert!(harness.argument(&long).is_some(), "missing --{long}");
            argv.push(format!("--{long}"));
            argv.push(format!("{p}{c}"));
        }
    }
    assert_eq!(harness.result_for(&[])?, tree(|_, _| serde_json::Value::Null));

    let argv: Vec<&str> = argv.iter().map(String::as_str).collect();
    assert_eq!(
        harness.result_for(&argv)?,
        tree(|p, c| json!(format!("{p}{c}")))
    );
    Ok(())
}

#[test]
fn excluded_fields_are_not_configured() -> Result<()> {
    let spec = FormSpec::new()
        .field("value", FieldSpec::string())
        .field("kept", FieldSpec::string());
    let options = CompileOptions::new().exclude("value");
    let harness = Harness::with(spec, Overrides::new(), &options)?;
    assert!(harness.argument("value").is_none());
    assert_eq!(
        harness.result_for(&["--kept", "k"])?,
        json!({"value": null, "kept": "k"})
    );
    Ok(())
}

#[test]
fn short_arguments_merge_static_and_dynamic_tables() -> Result<()> {
    let spec = FormSpec::new()
        .short_arguments([('a', "alpha"), ('b', "bravo"), ('c', "echo")])
        .dynamic_short_arguments(|| ShortArguments::from([('c', "charlie"), ('d', "delta")]))
        .field("alpha", FieldSpec::string())
        .field("bravo", FieldSpec::string())
        .field("charlie", FieldSpec::string())
        .field("delta", FieldSpec::string());
    let harness = Harness::new(spec)?;
    for name in ["alpha", "bravo", "charlie", "delta"] {
        let short = harness.argument(name).and_then(|argument| argument.short);
        assert_eq!(short, name.chars().next());
    }
    assert_eq!(
        harness.result_for(&[])?,
        json!({"alpha": null, "bravo": null, "charlie": null, "delta": null})
    );
    assert_eq!(
        harness.result_for(&["-aecho", "-bgolf", "-ckilo", "-dlima"])?,
        json!({"alpha": "echo", "bravo": "golf", "charlie": "kilo", "delta": "lima"})
    );
    Ok(())
}

#[test]
fn short_argument_on_subform_is_rejected() {
    let child = FormSpec::new().field("value", FieldSpec::string());
    let spec = FormSpec::new()
        .short_arguments([('c', "child")])
        .field("child", FieldSpec::form(child));
    let err = Harness::new(spec).expect_err("subform short argument");
    assert!(
        err.to_string()
            .contains("cannot assign a short argument to a FormField")
    );
}

#[test]
fn single_character_field_names_are_rejected() {
    let spec = FormSpec::new().field("a", FieldSpec::string());
    let err = Harness::new(spec).expect_err("single character name");
    assert!(matches!(err, FormError::FieldNameTooShort { .. }));
    assert!(
        err.to_string()
            .contains("field names must be at least two characters")
    );
}

#[test]
fn unsupported_field_types_are_rejected() {
    let spec = FormSpec::new().field("submit", FieldSpec::submit());
    let err = Harness::new(spec).expect_err("submit field");
    let message = err.to_string();
    assert!(message.contains("unsupported field type"));
    assert!(message.contains("SubmitField"));
}
