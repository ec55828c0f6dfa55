//! Form declarations and the instantiated field tree.
//!
//! A [`FormSpec`] is the reusable declaration: an ordered list of named
//! [`FieldSpec`]s plus the short-argument tables. [`Form::new`] instantiates
//! it into a tree whose fields carry full hierarchical names: a field `value`
//! inside subform `b_bb` inside subform `xxx` is named `xxx-b_bb-value`.
//! Field short names must not contain the hierarchy separator.

use std::{fmt, sync::Arc};

use crate::{
    compile::ShortArguments,
    defaults::Overrides,
    engine::FieldState,
    field::{FieldKind, FieldSpec, Validator},
    parser::ParsedArgs,
    value::Value,
};

/// Separator joining ancestor names into a field's hierarchical name.
pub const SEPARATOR: char = '-';

/// Produces a short-argument table when the form is compiled.
pub type ShortArgumentsFn = Arc<dyn Fn() -> ShortArguments + Send + Sync>;

/// Declaration of a form: ordered fields and short-argument tables.
///
/// # Examples
///
/// ```
/// use form_args::{FieldSpec, FormSpec};
///
/// let comment = FormSpec::new()
///     .field("name", FieldSpec::string().description("name of commentor"))
///     .field("comment", FieldSpec::string().description("comment content"));
/// let rating = FormSpec::new()
///     .short_arguments([('s', "stars")])
///     .field("stars", FieldSpec::integer().default(5))
///     .field("comment", FieldSpec::form(comment));
/// assert_eq!(rating.fields().count(), 2);
/// ```
#[derive(Clone, Default)]
pub struct FormSpec {
    fields: Vec<(String, FieldSpec)>,
    short_arguments: ShortArguments,
    dynamic_short_arguments: Option<ShortArgumentsFn>,
}

impl FormSpec {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field. Declaration order is preserved everywhere: in the
    /// argument surface, in the data view and in error reports.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push((name.into(), spec));
        self
    }

    /// Sets the static short-argument table (letter to field name).
    #[must_use]
    pub fn short_arguments(mut self, table: impl Into<ShortArguments>) -> Self {
        self.short_arguments = table.into();
        self
    }

    /// Sets the dynamic short-argument table, evaluated at compile time.
    /// Its entries win over the static table on letter collisions.
    #[must_use]
    pub fn dynamic_short_arguments<F>(mut self, table: F) -> Self
    where
        F: Fn() -> ShortArguments + Send + Sync + 'static,
    {
        self.dynamic_short_arguments = Some(Arc::new(table));
        self
    }

    /// Declared fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

impl fmt::Debug for FormSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSpec")
            .field("fields", &self.fields)
            .field("short_arguments", &self.short_arguments)
            .field(
                "dynamic_short_arguments",
                &self.dynamic_short_arguments.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

/// One node of an instantiated tree.
#[derive(Debug)]
pub enum Node {
    /// Leaf field.
    Field(Field),
    /// Nested subform.
    Form(Subform),
}

impl Node {
    /// Hierarchical name of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => field.name(),
            Self::Form(subform) => subform.name(),
        }
    }
}

/// A subform node: a named, owned subtree.
#[derive(Debug)]
pub struct Subform {
    short_name: String,
    form: Form,
}

impl Subform {
    /// Hierarchical name of the subform.
    #[must_use]
    pub fn name(&self) -> &str {
        self.form.name().unwrap_or(&self.short_name)
    }

    /// Name within the parent form.
    #[must_use]
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// The nested tree.
    #[must_use]
    pub const fn form(&self) -> &Form {
        &self.form
    }

    pub(crate) const fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}

/// A leaf field with its bound state.
pub struct Field {
    name: String,
    path: Vec<String>,
    spec: FieldSpec,
    validators: Vec<Arc<dyn Validator>>,
    pub(crate) state: FieldState,
}

impl Field {
    pub(crate) fn new(name: String, path: Vec<String>, spec: FieldSpec) -> Self {
        let validators = spec.effective_validators();
        Self {
            name,
            path,
            spec,
            validators,
            state: FieldState::default(),
        }
    }

    /// Hierarchical name, for example `xxx-b_bb-value`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name within the owning form.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.path.last().map_or(self.name.as_str(), String::as_str)
    }

    /// Short names from the root down to this field.
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Declaration of the field.
    #[must_use]
    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Field kind.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        self.spec.kind()
    }

    /// Returns `true` when the field holds an ordered sequence.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.spec.kind().is_multiple()
    }

    /// Coerced data.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.state.data.as_ref()
    }

    /// Raw strings read from form data; `None` when processed without form
    /// data.
    #[must_use]
    pub fn raw(&self) -> Option<&[String]> {
        self.state.raw.as_deref()
    }

    /// Validation errors recorded by the last `validate`.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.state.errors
    }

    /// Entries of a list field.
    #[must_use]
    pub fn entries(&self) -> &[Self] {
        &self.state.entries
    }

    pub(crate) fn validator_chain(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    fn data_json(&self) -> serde_json::Value {
        self.data()
            .and_then(|value| serde_json::to_value(value).ok())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", self.spec.kind())
            .field("data", &self.state.data)
            .field("errors", &self.state.errors)
            .finish_non_exhaustive()
    }
}

/// An instantiated field tree.
///
/// Construction processes every field once without form data, so a fresh
/// form already exposes resolved defaults through [`Form::data`].
pub struct Form {
    name: Option<String>,
    nodes: Vec<Node>,
    short_arguments: ShortArguments,
    dynamic_short_arguments: Option<ShortArgumentsFn>,
    overrides: Overrides,
    args: Option<Arc<dyn ParsedArgs>>,
}

impl Form {
    /// Instantiates `spec` without overrides.
    #[must_use]
    pub fn new(spec: &FormSpec) -> Self {
        Self::with_overrides(spec, Overrides::default())
    }

    /// Instantiates `spec` with an object override and/or seed data.
    #[must_use]
    pub fn with_overrides(spec: &FormSpec, overrides: Overrides) -> Self {
        let mut form = Self::build(spec, None, &[], &overrides);
        form.process_tree(None);
        form
    }

    fn build(spec: &FormSpec, name: Option<String>, path: &[String], overrides: &Overrides) -> Self {
        let nodes = spec
            .fields
            .iter()
            .map(|(short_name, field_spec)| {
                let full_name = name.as_ref().map_or_else(
                    || short_name.clone(),
                    |prefix| format!("{prefix}{SEPARATOR}{short_name}"),
                );
                let mut field_path = path.to_vec();
                field_path.push(short_name.clone());
                match field_spec.kind() {
                    FieldKind::Form(subspec) => Node::Form(Subform {
                        short_name: short_name.clone(),
                        form: Self::build(subspec, Some(full_name), &field_path, overrides),
                    }),
                    _ => Node::Field(Field::new(full_name, field_path, field_spec.clone())),
                }
            })
            .collect();
        Self {
            name,
            nodes,
            short_arguments: spec.short_arguments.clone(),
            dynamic_short_arguments: spec.dynamic_short_arguments.clone(),
            overrides: overrides.clone(),
            args: None,
        }
    }

    /// Hierarchical name of the subform this tree belongs to; `None` at the
    /// root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Nodes in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Leaf field declared under `short_name` in this form.
    #[must_use]
    pub fn field(&self, short_name: &str) -> Option<&Field> {
        self.nodes.iter().find_map(|node| match node {
            Node::Field(field) if field.short_name() == short_name => Some(field),
            _ => None,
        })
    }

    /// Subform declared under `short_name` in this form.
    #[must_use]
    pub fn subform(&self, short_name: &str) -> Option<&Self> {
        self.nodes.iter().find_map(|node| match node {
            Node::Form(subform) if subform.short_name() == short_name => Some(subform.form()),
            _ => None,
        })
    }

    /// Static and dynamic short-argument tables merged, dynamic entries
    /// winning.
    #[must_use]
    pub fn merged_short_arguments(&self) -> ShortArguments {
        let dynamic = self
            .dynamic_short_arguments
            .as_ref()
            .map(|table| table())
            .unwrap_or_default();
        self.short_arguments.clone().merge(dynamic)
    }

    /// Overrides used to resolve defaults.
    #[must_use]
    pub const fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Parsed arguments stored by the last bind.
    #[must_use]
    pub fn args(&self) -> Option<&dyn ParsedArgs> {
        self.args.as_deref()
    }

    pub(crate) fn set_args(&mut self, args: Arc<dyn ParsedArgs>) {
        self.args = Some(args);
    }

    /// Data of every field, nested by subform, keyed by short name.
    #[must_use]
    pub fn data(&self) -> serde_json::Value {
        let map = self
            .nodes
            .iter()
            .map(|node| match node {
                Node::Field(field) => (field.short_name().to_owned(), field.data_json()),
                Node::Form(subform) => (subform.short_name().to_owned(), subform.form().data()),
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("nodes", &self.nodes)
            .field("short_arguments", &self.short_arguments)
            .field("bound", &self.args.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FormSpec, Node};
    use crate::{FieldSpec, Form, compile::ShortArguments};

    fn grandchild() -> FormSpec {
        FormSpec::new().field("value", FieldSpec::string())
    }

    fn child() -> FormSpec {
        FormSpec::new()
            .field("aaa", FieldSpec::form(grandchild()))
            .field("b_bb", FieldSpec::form(grandchild()))
    }

    #[test]
    fn nested_fields_carry_hierarchical_names() {
        let parent = FormSpec::new().field("xxx", FieldSpec::form(child()));
        let form = Form::new(&parent);
        let value = form
            .subform("xxx")
            .and_then(|xxx| xxx.subform("b_bb"))
            .and_then(|b_bb| b_bb.field("value"))
            .expect("nested field");
        assert_eq!(value.name(), "xxx-b_bb-value");
        assert_eq!(value.short_name(), "value");
        assert_eq!(value.path(), ["xxx", "b_bb", "value"]);
    }

    #[test]
    fn fresh_forms_expose_defaults() {
        let spec = FormSpec::new()
            .field("all", FieldSpec::string().default("foo"))
            .field("bare", FieldSpec::string())
            .field("nested", FieldSpec::form(grandchild()));
        let form = Form::new(&spec);
        assert_eq!(
            form.data(),
            json!({"all": "foo", "bare": null, "nested": {"value": null}})
        );
    }

    #[test]
    fn nodes_keep_declaration_order() {
        let spec = FormSpec::new()
            .field("zulu", FieldSpec::string())
            .field("alpha", FieldSpec::form(grandchild()))
            .field("mike", FieldSpec::integer());
        let form = Form::new(&spec);
        let names: Vec<_> = form.nodes().iter().map(Node::name).collect();
        assert_eq!(names, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn dynamic_short_arguments_win_on_collision() {
        let spec = FormSpec::new()
            .short_arguments([('a', "alpha"), ('c', "echo")])
            .dynamic_short_arguments(|| ShortArguments::from([('c', "charlie")]));
        let merged = Form::new(&spec).merged_short_arguments();
        assert_eq!(merged.get('a'), Some("alpha"));
        assert_eq!(merged.get('c'), Some("charlie"));
    }
}
