//! Argument-surface compiler.
//!
//! [`compile`] walks a [`Form`] once in declaration order and registers one
//! argument per leaf field with an [`ArgumentParser`]. Nesting is encoded in
//! the field names themselves, so subforms add no extra prefixing: the leaf
//! `xxx-b_bb-value` becomes `--xxx-b-bb-value` with destination
//! `xxx_b_bb_value`.

mod help;
mod short;

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use tracing::debug;

pub use short::ShortArguments;

use crate::{
    defaults::resolve,
    error::{FormError, FormResult},
    field::FieldKind,
    form::{Field, Form, Node},
    parser::flatten_name,
};

/// Letters the parser keeps for its own flags.
const RESERVED_SHORTS: &[char] = &['h', 'V'];

/// Long flags the parser keeps for its own flags.
const RESERVED_LONGS: &[&str] = &["help", "version"];

/// How repeated occurrences of a flag are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentAction {
    /// Single value; the last occurrence wins.
    Store,
    /// Every occurrence is appended to an ordered sequence.
    Append,
}

/// One argument registration, independent of the parser backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Flattened destination, for example `xxx_b_bb_value`.
    pub dest: String,
    /// Long flag without the leading dashes, for example `xxx-b-bb-value`.
    pub long: String,
    /// Short flag letter.
    pub short: Option<char>,
    /// Assembled help text.
    pub help: String,
    /// Value placeholder shown in help output.
    pub metavar: String,
    /// Parser default, rendered as a string.
    pub default: Option<String>,
    /// Occurrence handling.
    pub action: ArgumentAction,
}

/// Parser backends accepting argument registrations.
///
/// `clap::Command` implements this in [`crate::parser`]; `Vec<ArgumentSpec>`
/// records registrations verbatim.
pub trait ArgumentParser {
    /// Registers one argument.
    fn add_argument(&mut self, argument: ArgumentSpec);
}

impl ArgumentParser for Vec<ArgumentSpec> {
    fn add_argument(&mut self, argument: ArgumentSpec) {
        self.push(argument);
    }
}

/// Options controlling a compile pass.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    exclude: BTreeSet<String>,
}

impl CompileOptions {
    /// Default options: every field is compiled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips the field with hierarchical name `name`.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.insert(name.into());
        self
    }

    /// Returns `true` when `name` is excluded.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains(name)
    }
}

/// Compiles `form` into `parser`.
///
/// # Errors
///
/// Returns the first [`FormError`] met while walking the tree; arguments
/// registered before the failure stay registered.
///
/// # Examples
///
/// ```
/// use form_args::{ArgumentSpec, CompileOptions, FieldSpec, Form, FormSpec, compile};
///
/// let spec = FormSpec::new().field("all", FieldSpec::string().default("foo"));
/// let mut recorded: Vec<ArgumentSpec> = Vec::new();
/// compile(&Form::new(&spec), &mut recorded, &CompileOptions::new())?;
/// assert_eq!(recorded[0].long, "all");
/// assert_eq!(recorded[0].default.as_deref(), Some("foo"));
/// # Ok::<(), form_args::FormError>(())
/// ```
pub fn compile<P>(form: &Form, parser: &mut P, options: &CompileOptions) -> FormResult<()>
where
    P: ArgumentParser + ?Sized,
{
    compile_node(form, parser, options, &mut Registry::default(), true)
}

/// Long flags claimed so far, mapped to the field that claimed them.
///
/// The long flag and the destination both collapse `-` and `_` into one
/// character, so a clash in one is a clash in the other.
#[derive(Debug, Default)]
struct Registry {
    longs: BTreeMap<String, String>,
}

impl Registry {
    fn claim(&mut self, name: &str, long: &str) -> FormResult<()> {
        if RESERVED_LONGS.contains(&long) {
            return Err(FormError::ReservedLongArgument {
                name: name.to_owned(),
                long: long.to_owned(),
            });
        }
        match self.longs.entry(long.to_owned()) {
            Entry::Occupied(existing) => Err(FormError::DuplicateArgument {
                name: name.to_owned(),
                existing: existing.get().clone(),
                long: long.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(name.to_owned());
                Ok(())
            }
        }
    }
}

fn compile_node<P>(
    form: &Form,
    parser: &mut P,
    options: &CompileOptions,
    registry: &mut Registry,
    is_root: bool,
) -> FormResult<()>
where
    P: ArgumentParser + ?Sized,
{
    let shorts = if is_root {
        form.merged_short_arguments().invert()
    } else {
        BTreeMap::new()
    };
    for node in form.nodes() {
        let name = node.name();
        if name.chars().count() < 2 {
            return Err(FormError::FieldNameTooShort {
                name: name.to_owned(),
            });
        }
        if options.is_excluded(name) {
            debug!(field = name, "skipping excluded field");
            continue;
        }
        match node {
            Node::Form(subform) => {
                if let Some(short) = shorts.get(name) {
                    return Err(FormError::ShortArgumentAssignedToComposite {
                        name: name.to_owned(),
                        short: *short,
                    });
                }
                compile_node(subform.form(), parser, options, registry, false)?;
            }
            Node::Field(field) => {
                let argument = leaf_argument(form, field, shorts.get(name).copied())?;
                registry.claim(name, &argument.long)?;
                debug!(
                    field = name,
                    long = %argument.long,
                    short = ?argument.short,
                    action = ?argument.action,
                    "registering argument"
                );
                parser.add_argument(argument);
            }
        }
    }
    Ok(())
}

fn leaf_argument(form: &Form, field: &Field, short: Option<char>) -> FormResult<ArgumentSpec> {
    let action = argument_action(field)?;
    if let Some(letter) = short.filter(|letter| RESERVED_SHORTS.contains(letter)) {
        return Err(FormError::ReservedShortArgument {
            name: field.name().to_owned(),
            short: letter,
        });
    }
    let spec = field.spec();
    let resolved = resolve(spec, field.path(), form.overrides());
    let dest = flatten_name(field.name());
    let metavar = spec
        .metavar_text()
        .map_or_else(|| dest.to_uppercase(), str::to_owned);
    Ok(ArgumentSpec {
        long: field.name().replace('_', "-"),
        short,
        help: help::help_text(spec, &resolved),
        metavar,
        default: resolved.argument_value(field.kind()),
        action,
        dest,
    })
}

fn argument_action(field: &Field) -> FormResult<ArgumentAction> {
    match field.kind() {
        FieldKind::String
        | FieldKind::Integer
        | FieldKind::Float
        | FieldKind::Decimal
        | FieldKind::Date { .. }
        | FieldKind::DateTime { .. }
        | FieldKind::Time { .. }
        | FieldKind::Select { .. } => Ok(ArgumentAction::Store),
        FieldKind::SelectMultiple { .. } => Ok(ArgumentAction::Append),
        FieldKind::List(entry) if entry.kind().is_list_entry() => Ok(ArgumentAction::Append),
        kind => Err(FormError::UnsupportedFieldType {
            type_name: kind.type_name(),
            name: field.name().to_owned(),
        }),
    }
}

impl Form {
    /// Registers every leaf of this form with `parser`.
    ///
    /// # Errors
    ///
    /// See [`compile`].
    pub fn configure_parser<P>(&self, parser: &mut P) -> FormResult<()>
    where
        P: ArgumentParser + ?Sized,
    {
        compile(self, parser, &CompileOptions::default())
    }

    /// Registers the leaves of this form with `parser`, honouring `options`.
    ///
    /// # Errors
    ///
    /// See [`compile`].
    pub fn configure_parser_with<P>(&self, parser: &mut P, options: &CompileOptions) -> FormResult<()>
    where
        P: ArgumentParser + ?Sized,
    {
        compile(self, parser, options)
    }
}
