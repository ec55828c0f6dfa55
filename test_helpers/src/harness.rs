//! Compile-and-run harness for form declarations.
//!
//! # Examples
//!
//! ```
//! use form_args::{FieldSpec, FormSpec};
//! use form_args_test_helpers::Harness;
//! use serde_json::json;
//!
//! let spec = FormSpec::new().field("all", FieldSpec::string().default("foo"));
//! let harness = Harness::new(spec)?;
//! assert!(harness.argument("all").is_some_and(|a| a.help.contains("(default: foo)")));
//! assert_eq!(harness.result_for(&["--all=bar"])?, json!({"all": "bar"}));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Result, anyhow, bail};
use clap::Command;
use form_args::{ArgumentSpec, CompileOptions, Form, FormResult, FormSpec, Overrides};

/// Binary name used for simulated command lines.
const PROGRAM: &str = "harness";

/// A compiled form plus the arguments it registered.
#[derive(Debug)]
pub struct Harness {
    spec: FormSpec,
    arguments: Vec<ArgumentSpec>,
    command: Command,
}

impl Harness {
    /// Compiles `spec` without overrides or exclusions.
    ///
    /// # Errors
    ///
    /// Returns the compile error raised by the form.
    pub fn new(spec: FormSpec) -> FormResult<Self> {
        Self::with(spec, Overrides::new(), &CompileOptions::new())
    }

    /// Compiles `spec`, resolving help defaults through `overrides`.
    ///
    /// # Errors
    ///
    /// Returns the compile error raised by the form.
    pub fn with(spec: FormSpec, overrides: Overrides, options: &CompileOptions) -> FormResult<Self> {
        let form = Form::with_overrides(&spec, overrides);
        let mut arguments = Vec::new();
        form.configure_parser_with(&mut arguments, options)?;
        let mut command = Command::new(PROGRAM);
        form.configure_parser_with(&mut command, options)?;
        Ok(Self {
            spec,
            arguments,
            command,
        })
    }

    /// Registered argument whose long flag is `long`.
    #[must_use]
    pub fn argument(&self, long: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|argument| argument.long == long)
    }

    /// Every registered argument, in registration order.
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    /// Rendered `--help` output.
    #[must_use]
    pub fn help(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    /// Form data after parsing `argv` with a fresh, override-free form.
    ///
    /// # Errors
    ///
    /// Fails when `clap` rejects `argv` or when validation records errors.
    pub fn result_for(&self, argv: &[&str]) -> Result<serde_json::Value> {
        self.result_with(Overrides::new(), argv)
    }

    /// Form data after parsing `argv` with a form built from `overrides`.
    ///
    /// # Errors
    ///
    /// Fails when `clap` rejects `argv` or when validation records errors.
    pub fn result_with(&self, overrides: Overrides, argv: &[&str]) -> Result<serde_json::Value> {
        let (form, valid) = self.bind(overrides, argv)?;
        if !valid {
            bail!("validation failed: {}", form.error_lines().join("; "));
        }
        Ok(form.data())
    }

    /// Parses `argv`, binds and validates, returning the form and the
    /// validation outcome.
    ///
    /// # Errors
    ///
    /// Fails when `clap` rejects `argv`.
    pub fn bind(&self, overrides: Overrides, argv: &[&str]) -> Result<(Form, bool)> {
        let matches = self
            .command
            .clone()
            .try_get_matches_from(std::iter::once(PROGRAM).chain(argv.iter().copied()))
            .map_err(|err| anyhow!("argument parsing failed: {err}"))?;
        let mut form = Form::with_overrides(&self.spec, overrides);
        let valid = form.bind_and_validate(matches);
        Ok((form, valid))
    }
}
