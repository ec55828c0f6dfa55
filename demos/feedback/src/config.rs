//! Default values from configuration files and the environment.
//!
//! Values are read from `feedback.toml` (or the file named by
//! `FEEDBACK_CONFIG`) and then from `FEEDBACK_*` variables, where `__`
//! separates nesting levels: `FEEDBACK_COMMENT__AUTHOR=ada`.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use form_args::Overrides;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV: &str = "FEEDBACK_CONFIG";

/// File read when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "feedback.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FEEDBACK_";

/// Path of the configuration file to read.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
}

/// Layers the configuration file under environment variables.
///
/// A missing file contributes nothing.
#[must_use]
pub fn sources(path: &Path) -> Figment {
    Figment::new().merge(Toml::file(path)).merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["config"])
            .split("__"),
    )
}

/// Overrides backed by [`sources`] for [`config_path`].
#[must_use]
pub fn load_overrides() -> Overrides {
    Overrides::new().with_object(sources(&config_path()))
}
