//! CLI configuration: thin wrapper around `hrdash_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (`--profile`, `--base-url`, `--timeout`, `--output`, `--color`).

use std::time::Duration;

use clap::ValueEnum;

use hrdash_core::DashboardConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use hrdash_config::{
    Config, FileSessionStorage, Profile, config_path, load_config, profile_to_dashboard_config,
    save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// Build the dashboard settings for the active profile.
///
/// Precedence: flag / env var, then profile, then `[defaults]`.
pub fn resolve_dashboard_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<(String, DashboardConfig), CliError> {
    let name = active_profile_name(global, config);
    let mut profile = match config.profile(&name) {
        Ok(profile) => profile,
        // A base URL on the command line is enough to run without a profile.
        Err(_) if global.base_url.is_some() => Profile::default(),
        Err(_) => {
            let names = config.profile_names();
            return Err(CliError::ProfileNotFound {
                name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
    };

    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    let mut dashboard = profile_to_dashboard_config(&profile, &config.defaults)?;
    if let Some(secs) = global.timeout {
        dashboard.timeout = Duration::from_secs(secs);
    }
    Ok((name, dashboard))
}

/// Fill unset `--output` / `--color` from the config file defaults.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Parse a `--output` style value, for `config set`.
pub fn parse_value_enum<T: ValueEnum>(field: &str, value: &str) -> Result<(), CliError> {
    T::from_str(value, true).map(|_| ()).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
