//! Reference validation engine.
//!
//! Processing assigns each field its initial data from the resolved default
//! and, when form data is present, replaces it with the coerced command-line
//! input. Validation then runs the choice pre-checks and the validator chain
//! and records messages on each field.

pub(crate) mod coerce;

use std::collections::BTreeSet;

use tracing::trace;

use crate::{
    defaults::{Overrides, resolve},
    field::{FieldInput, FieldKind, ValidationError},
    form::{Field, Form, Node, SEPARATOR},
    multidict::Multidict,
    value::Value,
};

/// Mutable state of a processed field.
#[derive(Debug, Default)]
pub(crate) struct FieldState {
    pub(crate) data: Option<Value>,
    pub(crate) raw: Option<Vec<String>>,
    pub(crate) process_errors: Vec<String>,
    pub(crate) errors: Vec<String>,
    pub(crate) entries: Vec<Field>,
}

impl Field {
    fn process(&mut self, source: Option<&Multidict>, overrides: &Overrides) {
        let initial = resolve(self.spec(), self.path(), overrides).initial_value();
        let mut state = FieldState {
            data: initial,
            ..FieldState::default()
        };
        let Some(formdata) = source else {
            let toggle = matches!(self.kind(), FieldKind::Boolean | FieldKind::Submit);
            if toggle && state.data.is_none() {
                state.data = Some(Value::Bool(false));
            }
            self.state = state;
            return;
        };

        let raw: Vec<String> = formdata
            .get_list(self.name())
            .into_iter()
            .map(str::to_owned)
            .collect();
        match self.kind().clone() {
            FieldKind::List(entry_spec) => {
                let mut entries = Vec::new();
                for index in entry_indices(formdata, self.name()) {
                    let mut path = self.path().to_vec();
                    path.push(index.to_string());
                    let name = format!("{}{SEPARATOR}{index}", self.name());
                    let mut entry = Self::new(name, path, (*entry_spec).clone());
                    entry.process(Some(formdata), overrides);
                    entries.push(entry);
                }
                state.data = Some(Value::List(
                    entries.iter().filter_map(|entry| entry.data().cloned()).collect(),
                ));
                state.entries = entries;
            }
            FieldKind::SelectMultiple { .. } => {
                state.data = Some(Value::List(raw.iter().cloned().map(Value::Str).collect()));
            }
            FieldKind::Boolean | FieldKind::Submit => {
                state.data = Some(Value::Bool(
                    raw.first().is_some_and(|value| !value.is_empty()),
                ));
            }
            kind => {
                if let Some(first) = raw.first() {
                    match coerce::scalar(&kind, first) {
                        Ok(value) => state.data = Some(value),
                        Err(message) => {
                            trace!(
                                field = self.name(),
                                raw = %first,
                                error = message,
                                "coercion failed"
                            );
                            state.data = None;
                            state.process_errors.push(message.to_owned());
                        }
                    }
                }
            }
        }
        state.raw = Some(raw);
        self.state = state;
    }

    fn validate(&mut self) -> bool {
        let mut errors = self.state.process_errors.clone();
        for entry in &mut self.state.entries {
            entry.validate();
            errors.extend(entry.errors().iter().cloned());
        }
        let stopped = match self.pre_validate() {
            Ok(()) => false,
            Err(ValidationError::Invalid(message)) => {
                errors.push(message);
                false
            }
            Err(ValidationError::Stop(message)) => {
                errors.extend(message);
                true
            }
            Err(ValidationError::Skip) => {
                errors.clear();
                true
            }
        };
        if !stopped {
            self.run_chain(&mut errors);
        }
        self.state.errors = errors;
        self.state.errors.is_empty()
    }

    fn pre_validate(&self) -> Result<(), ValidationError> {
        match self.kind() {
            FieldKind::Select { choices } => {
                let selected = self.data().and_then(Value::as_str);
                if choices
                    .iter()
                    .any(|choice| Some(choice.value.as_str()) == selected)
                {
                    Ok(())
                } else {
                    Err(ValidationError::Invalid("Not a valid choice".to_owned()))
                }
            }
            FieldKind::SelectMultiple { choices } => {
                let Some(Value::List(selected)) = self.data() else {
                    return Ok(());
                };
                let invalid = selected.iter().find(|value| {
                    !choices
                        .iter()
                        .any(|choice| Some(choice.value.as_str()) == value.as_str())
                });
                match invalid {
                    Some(value) => Err(ValidationError::Invalid(format!(
                        "'{value}' is not a valid choice for this field"
                    ))),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    fn run_chain(&self, errors: &mut Vec<String>) {
        let input = FieldInput {
            name: self.name(),
            raw: self.raw(),
            data: self.data(),
        };
        for validator in self.validator_chain() {
            match validator.validate(&input) {
                Ok(()) => {}
                Err(ValidationError::Invalid(message)) => errors.push(message),
                Err(ValidationError::Stop(message)) => {
                    errors.extend(message.filter(|text| !text.is_empty()));
                    break;
                }
                Err(ValidationError::Skip) => {
                    errors.clear();
                    break;
                }
            }
        }
    }
}

/// Sorted indices of `name-N` keys in `formdata`.
fn entry_indices(formdata: &Multidict, name: &str) -> BTreeSet<usize> {
    let prefix = format!("{name}{SEPARATOR}");
    formdata
        .keys()
        .filter_map(|key| key.strip_prefix(&prefix)?.parse().ok())
        .collect()
}

impl Form {
    /// Processes the leaf fields of this node from `formdata`.
    ///
    /// An empty [`Multidict`] counts as no form data: fields then keep their
    /// resolved defaults. Subforms are left untouched.
    pub fn process(&mut self, formdata: Option<&Multidict>) {
        let present = formdata.filter(|data| !data.is_empty());
        let overrides = self.overrides().clone();
        for node in self.nodes_mut() {
            if let Node::Field(field) = node {
                field.process(present, &overrides);
            }
        }
    }

    /// Processes this node and every subform below it.
    pub fn process_tree(&mut self, formdata: Option<&Multidict>) {
        self.process(formdata);
        for node in self.nodes_mut() {
            if let Node::Form(subform) = node {
                subform.form_mut().process_tree(formdata);
            }
        }
    }

    /// Validates every field of the tree, recording errors on each.
    ///
    /// Returns `true` when no field recorded an error.
    pub fn validate(&mut self) -> bool {
        self.nodes_mut().iter_mut().fold(true, |valid, node| {
            let node_valid = match node {
                Node::Field(field) => field.validate(),
                Node::Form(subform) => subform.form_mut().validate(),
            };
            valid && node_valid
        })
    }

    /// Returns `true` when any field of the tree holds an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.nodes().iter().any(|node| match node {
            Node::Field(field) => !field.errors().is_empty(),
            Node::Form(subform) => subform.form().has_errors(),
        })
    }
}
