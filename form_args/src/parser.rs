//! Glue between the compiler/binder and `clap`.
//!
//! The compiler emits backend-neutral [`ArgumentSpec`]s; this module turns
//! them into [`clap::Arg`]s and reads parsed values back out of
//! [`clap::ArgMatches`] through the [`ParsedArgs`] trait.

use std::collections::BTreeMap;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{
    compile::{ArgumentAction, ArgumentParser, ArgumentSpec},
    form::SEPARATOR,
};

/// Character the parser uses in place of [`SEPARATOR`] in destinations.
pub const FLAT_SEPARATOR: char = '_';

/// Collapses a hierarchical field name into a parser destination.
///
/// The mapping is lossy: `xxx-b_bb-value` and `xxx_b-bb_value` both flatten
/// to `xxx_b_bb_value`. The binder restores the separators from the tree.
#[must_use]
pub fn flatten_name(name: &str) -> String {
    name.replace(SEPARATOR, &FLAT_SEPARATOR.to_string())
}

impl ArgumentSpec {
    /// Builds the `clap` argument.
    ///
    /// Store arguments override themselves, so repeating the flag keeps the
    /// last value instead of failing.
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.dest.clone())
            .long(self.long.clone())
            .value_name(self.metavar.clone());
        if !self.help.is_empty() {
            arg = arg.help(self.help.clone());
        }
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        arg = match self.action {
            ArgumentAction::Store => arg
                .action(ArgAction::Set)
                .overrides_with(self.dest.clone()),
            ArgumentAction::Append => arg.action(ArgAction::Append),
        };
        if let Some(default) = &self.default {
            arg = arg.default_value(default.clone());
        }
        arg
    }
}

impl ArgumentParser for Command {
    fn add_argument(&mut self, argument: ArgumentSpec) {
        *self = std::mem::take(self).arg(argument.to_arg());
    }
}

/// Parsed command-line values addressed by flattened destination.
pub trait ParsedArgs: Send + Sync {
    /// Single value stored under `dest`.
    fn value(&self, dest: &str) -> Option<String>;

    /// Every value stored under `dest`, in occurrence order.
    fn values(&self, dest: &str) -> Option<Vec<String>>;
}

impl ParsedArgs for ArgMatches {
    fn value(&self, dest: &str) -> Option<String> {
        self.try_get_one::<String>(dest).ok().flatten().cloned()
    }

    fn values(&self, dest: &str) -> Option<Vec<String>> {
        self.try_get_many::<String>(dest)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
    }
}

/// Hand-built parsed arguments, mainly for tests and non-`clap` front ends.
/// A scalar read returns the last stored value.
impl ParsedArgs for BTreeMap<String, Vec<String>> {
    fn value(&self, dest: &str) -> Option<String> {
        self.get(dest)?.last().cloned()
    }

    fn values(&self, dest: &str) -> Option<Vec<String>> {
        self.get(dest).cloned()
    }
}

#[cfg(test)]
mod tests {
    use clap::Command;
    use rstest::rstest;

    use super::{ParsedArgs, flatten_name};
    use crate::compile::{ArgumentAction, ArgumentParser, ArgumentSpec};

    fn spec(action: ArgumentAction, default: Option<&str>) -> ArgumentSpec {
        ArgumentSpec {
            dest: "xxx_value".to_owned(),
            long: "xxx-value".to_owned(),
            short: Some('x'),
            help: String::new(),
            metavar: "XXX_VALUE".to_owned(),
            default: default.map(str::to_owned),
            action,
        }
    }

    fn parse(argument: ArgumentSpec, argv: &[&str]) -> clap::ArgMatches {
        let mut command = Command::new("demo");
        command.add_argument(argument);
        command
            .try_get_matches_from(std::iter::once("demo").chain(argv.iter().copied()))
            .expect("parse")
    }

    #[rstest]
    #[case("all", "all")]
    #[case("xxx-b_bb-value", "xxx_b_bb_value")]
    fn flattens_separators(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(flatten_name(name), expected);
    }

    #[test]
    fn store_keeps_last_occurrence() {
        let matches = parse(spec(ArgumentAction::Store, None), &["--xxx-value", "a", "-x", "b"]);
        assert_eq!(matches.value("xxx_value").as_deref(), Some("b"));
    }

    #[test]
    fn store_falls_back_to_default() {
        let matches = parse(spec(ArgumentAction::Store, Some("foo")), &[]);
        assert_eq!(matches.value("xxx_value").as_deref(), Some("foo"));
    }

    #[test]
    fn append_collects_every_occurrence() {
        let matches = parse(spec(ArgumentAction::Append, None), &["--xxx-value", "a", "-x", "b"]);
        assert_eq!(
            matches.values("xxx_value"),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn unknown_destinations_read_as_absent() {
        let matches = parse(spec(ArgumentAction::Append, None), &[]);
        assert_eq!(matches.values("xxx_value"), None);
        assert_eq!(matches.value("missing"), None);
    }
}
