//! Form-data binder.
//!
//! The parser only knows flattened destinations (`xxx_b_bb_value`), in which
//! the hierarchy separator has collapsed into `_`. The binder walks the tree
//! alongside the parsed arguments and records, per subform depth, the byte
//! offset at which a separator must be reinserted, rebuilding the
//! hierarchical key (`xxx-b_bb-value`) the engine reads.

use std::sync::Arc;

use clap::Command;
use tracing::debug;

use crate::{
    error::FormResult,
    form::{Form, Node, SEPARATOR},
    multidict::{MultiValue, Multidict},
    parser::{FLAT_SEPARATOR, ParsedArgs, flatten_name},
};

/// Translates parsed arguments into a fresh [`Multidict`].
#[must_use]
pub fn populate(form: &Form, args: &dyn ParsedArgs) -> Multidict {
    let mut formdata = Multidict::new();
    populate_into(form, args, &mut formdata, &[]);
    formdata
}

/// Translates parsed arguments into `formdata`.
///
/// `offsets` holds the separator positions contributed by the ancestors of
/// `form`; callers start from an empty slice.
pub fn populate_into(
    form: &Form,
    args: &dyn ParsedArgs,
    formdata: &mut Multidict,
    offsets: &[usize],
) {
    for node in form.nodes() {
        match node {
            Node::Form(subform) => {
                let mut nested = offsets.to_vec();
                nested.push(subform.name().len());
                populate_into(subform.form(), args, formdata, &nested);
            }
            Node::Field(field) => {
                let dest = flatten_name(field.name());
                let key = reinsert_separators(&dest, offsets);
                if field.is_multiple() {
                    let Some(values) = args.values(&dest) else {
                        continue;
                    };
                    if field.kind().choices().is_some() {
                        debug!(key = %key, count = values.len(), "populating selection");
                        formdata.insert(key, MultiValue::Sequence(values));
                    } else {
                        debug!(key = %key, count = values.len(), "populating list entries");
                        for (index, value) in values.into_iter().enumerate() {
                            formdata.insert(format!("{key}{SEPARATOR}{index}"), value);
                        }
                    }
                } else if let Some(value) = args.value(&dest) {
                    debug!(key = %key, "populating value");
                    formdata.insert(key, value);
                }
            }
        }
    }
}

/// Replaces the flattened separator at each of `offsets` with the
/// hierarchy separator.
///
/// ```
/// use form_args::reinsert_separators;
///
/// assert_eq!(reinsert_separators("xxx_b_bb_value", &[3, 8]), "xxx-b_bb-value");
/// ```
#[must_use]
pub fn reinsert_separators(flat: &str, offsets: &[usize]) -> String {
    flat.char_indices()
        .map(|(index, ch)| {
            if ch == FLAT_SEPARATOR && offsets.contains(&index) {
                SEPARATOR
            } else {
                ch
            }
        })
        .collect()
}

/// Stores `args` on every node and reprocesses each node from `formdata`.
pub fn bind(form: &mut Form, formdata: &Multidict, args: &Arc<dyn ParsedArgs>) {
    debug!(form = form.name().unwrap_or("<root>"), "binding form data");
    form.set_args(Arc::clone(args));
    form.process(Some(formdata));
    for node in form.nodes_mut() {
        if let Node::Form(subform) = node {
            bind(subform.form_mut(), formdata, args);
        }
    }
}

/// Populates a sentinel-seeded [`Multidict`] from `args` and binds it.
pub fn bind_args(form: &mut Form, args: &Arc<dyn ParsedArgs>) {
    let mut formdata = Multidict::with_sentinel();
    populate_into(form, args.as_ref(), &mut formdata, &[]);
    bind(form, &formdata, args);
}

impl Form {
    /// Binds parsed arguments to the tree. Repeating the call with the same
    /// arguments yields the same state.
    pub fn bind_args<A: ParsedArgs + 'static>(&mut self, args: A) {
        let shared: Arc<dyn ParsedArgs> = Arc::new(args);
        bind_args(self, &shared);
    }

    /// Binds parsed arguments and validates the tree.
    ///
    /// Returns `true` when no field recorded an error.
    pub fn bind_and_validate<A: ParsedArgs + 'static>(&mut self, args: A) -> bool {
        self.bind_args(args);
        self.validate()
    }

    /// Compiles this form into `command`, parses `argv` and binds and
    /// validates the result.
    ///
    /// `argv` includes the binary name, as with
    /// [`Command::try_get_matches_from`].
    ///
    /// # Errors
    ///
    /// Returns compile errors, or [`crate::FormError::CliParsing`] when
    /// `clap` rejects `argv` (including `--help` requests; see
    /// [`crate::is_display_request`]).
    pub fn parse_from<I, T>(&mut self, mut command: Command, argv: I) -> FormResult<bool>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        self.configure_parser(&mut command)?;
        let matches = command.try_get_matches_from(argv)?;
        Ok(self.bind_and_validate(matches))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;
    use serde_json::json;

    use super::{populate, reinsert_separators};
    use crate::{FieldSpec, Form, FormSpec};

    fn args(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(dest, values)| {
                let owned = values.iter().map(|value| (*value).to_owned()).collect();
                ((*dest).to_owned(), owned)
            })
            .collect()
    }

    fn nested() -> FormSpec {
        let grandchild = FormSpec::new().field("value", FieldSpec::string());
        let child = FormSpec::new()
            .field("aaa", FieldSpec::form(grandchild.clone()))
            .field("b_bb", FieldSpec::form(grandchild.clone()))
            .field("c_c_c", FieldSpec::form(grandchild));
        FormSpec::new().field("xxx", FieldSpec::form(child))
    }

    #[rstest]
    #[case("all", &[], "all")]
    #[case("xxx_aaa_value", &[3, 7], "xxx-aaa-value")]
    #[case("xxx_c_c_c_value", &[3, 9], "xxx-c_c_c-value")]
    #[case("a_b", &[7], "a_b")]
    fn restores_hierarchy(#[case] flat: &str, #[case] offsets: &[usize], #[case] expected: &str) {
        assert_eq!(reinsert_separators(flat, offsets), expected);
    }

    #[test]
    fn populate_rebuilds_hierarchical_keys() {
        let form = Form::new(&nested());
        let parsed = args(&[
            ("xxx_aaa_value", &["xa"]),
            ("xxx_b_bb_value", &["xb"]),
            ("xxx_c_c_c_value", &["xc"]),
        ]);
        let formdata = populate(&form, &parsed);
        let keys: Vec<_> = formdata.keys().collect();
        assert_eq!(keys, ["xxx-aaa-value", "xxx-b_bb-value", "xxx-c_c_c-value"]);
    }

    #[test]
    fn lists_expand_into_indexed_entries() {
        let spec = FormSpec::new().field("value", FieldSpec::list(FieldSpec::string()));
        let formdata = populate(&Form::new(&spec), &args(&[("value", &["x", "y"])]));
        assert_eq!(formdata.get("value-0"), Some("x"));
        assert_eq!(formdata.get("value-1"), Some("y"));
        assert!(!formdata.contains_key("value"));
    }

    #[test]
    fn multi_selects_keep_one_sequence() {
        let spec = FormSpec::new().field("value", FieldSpec::select_multiple(["x", "y"]));
        let formdata = populate(&Form::new(&spec), &args(&[("value", &["x", "y"])]));
        assert_eq!(formdata.get_list("value"), vec!["x", "y"]);
    }

    #[test]
    fn absent_values_produce_no_entries() {
        let spec = FormSpec::new()
            .field("value", FieldSpec::string())
            .field("many", FieldSpec::list(FieldSpec::string()));
        assert!(populate(&Form::new(&spec), &args(&[])).is_empty());
    }

    #[test]
    fn binding_is_idempotent() {
        let mut form = Form::new(&nested());
        let parsed = args(&[("xxx_aaa_value", &["xa"]), ("xxx_b_bb_value", &["xb"])]);
        form.bind_args(parsed.clone());
        let first = form.data();
        form.bind_args(parsed);
        assert_eq!(form.data(), first);
        assert_eq!(
            first,
            json!({"xxx": {"aaa": {"value": "xa"}, "b_bb": {"value": "xb"}, "c_c_c": {"value": null}}})
        );
    }

    #[test]
    fn subforms_share_parsed_arguments() {
        let mut form = Form::new(&nested());
        form.bind_args(args(&[]));
        let grandchild = form.subform("xxx").and_then(|xxx| xxx.subform("aaa"));
        assert!(grandchild.and_then(Form::args).is_some());
    }
}
