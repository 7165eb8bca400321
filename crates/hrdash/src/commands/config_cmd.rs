//! Config subcommand handlers.

use std::fmt::Write as _;

use serde::Serialize;

use hrdash_core::DEFAULT_BASE_URL;

use crate::cli::{ColorMode, ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

const SETTABLE_KEYS: &str =
    "default_profile, defaults.output, defaults.color, defaults.timeout, base_url, timeout";

#[derive(Serialize)]
struct ProfileEntry<'a> {
    name: &'a str,
    base_url: &'a str,
    default: bool,
}

fn parse_timeout(field: &str, value: &str) -> Result<u64, CliError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| CliError::Validation {
            field: field.into(),
            reason: "must be a positive number of seconds".into(),
        })
}

fn save(cfg: &Config) -> Result<std::path::PathBuf, CliError> {
    Ok(config::save_config(cfg)?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts, mut cfg: Config) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { name, url } => {
            let name = match name {
                Some(name) => name,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Profile name")
                    .default("default".into())
                    .interact_text()
                    .map_err(util::prompt_err)?,
            };
            let base_url = match url {
                Some(url) => url,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("API base URL")
                    .default(DEFAULT_BASE_URL.into())
                    .interact_text()
                    .map_err(util::prompt_err)?,
            };

            let profile = Profile {
                base_url,
                timeout: None,
            };
            config::profile_to_dashboard_config(&profile, &cfg.defaults)?;

            let first = cfg.profiles.is_empty();
            cfg.profiles.insert(name.clone(), profile);
            if first {
                cfg.default_profile = Some(name.clone());
            }

            let path = save(&cfg)?;
            output::status(global, &format!("Configuration written to {}", path.display()));
            output::status(global, &format!("Profile '{name}' ready. Next: hrdash login -p {name}"));
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let out = output::render_single(
                global.format(),
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |_| config::config_path().display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let profile_name = config::active_profile_name(global, &cfg);

            match key.as_str() {
                "default_profile" => cfg.default_profile = Some(value),
                "defaults.output" => {
                    config::parse_value_enum::<OutputFormat>(&key, &value)?;
                    cfg.defaults.output = value;
                }
                "defaults.color" => {
                    config::parse_value_enum::<ColorMode>(&key, &value)?;
                    cfg.defaults.color = value;
                }
                "defaults.timeout" => cfg.defaults.timeout = parse_timeout(&key, &value)?,
                "base_url" | "timeout" => {
                    let mut profile = cfg.profile(&profile_name).unwrap_or_default();
                    if key == "base_url" {
                        profile.base_url = value;
                        config::profile_to_dashboard_config(&profile, &cfg.defaults)?;
                    } else {
                        profile.timeout = Some(parse_timeout(&key, &value)?);
                    }
                    cfg.profiles.insert(profile_name.clone(), profile);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!("unknown config key '{other}'. Valid keys: {SETTABLE_KEYS}"),
                    });
                }
            }

            save(&cfg)?;
            output::status(global, &format!("Set {key} (profile '{profile_name}')"));
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: hrdash config init");
                return Ok(());
            }
            let default = cfg.profile_name(None);
            let entries: Vec<ProfileEntry<'_>> = cfg
                .profile_names()
                .into_iter()
                .map(|name| ProfileEntry {
                    name,
                    base_url: &cfg.profiles[name].base_url,
                    default: name == default,
                })
                .collect();

            let out = output::render_single(
                global.format(),
                &entries,
                |entries| {
                    let mut text = String::new();
                    for e in entries {
                        let marker = if e.default { " *" } else { "" };
                        let _ = writeln!(text, "{}{marker}\t{}", e.name, e.base_url);
                    }
                    text.trim_end().to_owned()
                },
                |entries| {
                    entries
                        .iter()
                        .map(|e| e.name)
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            cfg.profile(&name).map_err(|_| {
                let names = cfg.profile_names();
                CliError::ProfileNotFound {
                    name: name.clone(),
                    available: if names.is_empty() {
                        "(none)".into()
                    } else {
                        names.join(", ")
                    },
                }
            })?;

            cfg.default_profile = Some(name.clone());
            save(&cfg)?;
            output::status(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}
