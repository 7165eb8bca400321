//! Shared helpers for command handlers.

use std::io::{BufRead, IsTerminal};
use std::path::Path;

use secrecy::SecretString;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, destructive actions need `--yes`.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for a line of text.
pub fn prompt_text(prompt: &str) -> Result<String, CliError> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(prompt_err)
}

/// Prompt for a secret without echo.
pub fn prompt_secret(prompt: &str) -> Result<SecretString, CliError> {
    let value = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    Ok(SecretString::from(value))
}

/// Read `count` lines from stdin, without their line endings.
pub fn read_stdin_lines(count: usize) -> Result<Vec<String>, CliError> {
    let stdin = std::io::stdin().lock();
    let lines: Vec<String> = stdin
        .lines()
        .take(count)
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_owned()))
        .collect::<Result<_, _>>()?;
    if lines.len() < count {
        return Err(CliError::Validation {
            field: "stdin".into(),
            reason: format!("expected {count} line(s), got {}", lines.len()),
        });
    }
    Ok(lines)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}
