// Input rules shared by the login, profile and password forms.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Characters of which a new password must contain at least one.
pub const PASSWORD_SPECIALS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub fn email(address: &str) -> Result<(), CoreError> {
    if address.trim().is_empty() {
        return Err(CoreError::validation("email is required"));
    }
    if !EMAIL.is_match(address) {
        return Err(CoreError::validation(format!(
            "{address:?} is not a valid email address"
        )));
    }
    Ok(())
}

/// Check a login form before it is sent.
pub fn credentials(address: &str, password: &str) -> Result<(), CoreError> {
    email(address)?;
    if password.is_empty() {
        return Err(CoreError::validation("password is required"));
    }
    Ok(())
}

/// Check a new password and its confirmation.
pub fn new_password(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(CoreError::validation(
            "the new password and confirmation password do not match",
        ));
    }
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if !(long_enough && has_special) {
        return Err(CoreError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long and contain at least one special character"
        )));
    }
    Ok(())
}
