//! Running configuration tests inside a [`figment::Jail`].
//!
//! The jail gives each test a scratch working directory and restores the
//! process environment afterwards, so tests can write `*.toml` files and set
//! variables freely.

use anyhow::{Result, anyhow};

/// Runs `f` inside a jail and hands back its output.
///
/// # Errors
///
/// Returns an error when the jail cannot be created or `f` fails.
///
/// # Examples
///
/// ```
/// use form_args_test_helpers::jail::with_jail;
///
/// let answer = with_jail(|jail| {
///     jail.set_env("FEEDBACK_STARS", "4");
///     Ok(std::env::var("FEEDBACK_STARS").unwrap_or_default())
/// })?;
/// assert_eq!(answer, "4");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    output.ok_or_else(|| anyhow!("jailed test produced no output"))
}

/// Converts an error from the code under test into a jail failure.
#[must_use]
pub fn jail_error(err: &impl std::fmt::Display) -> figment::Error {
    figment::Error::from(err.to_string())
}
