//! Session command handlers: login, logout, whoami, profile, password.

use secrecy::SecretString;

use hrdash_core::{ChangePasswordRequest, Dashboard, EditUserRequest, UserInfo, validate};

use crate::cli::{GlobalOpts, LoginArgs, PasswordArgs, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn user_detail(user: &UserInfo) -> String {
    format!(
        "Name:  {}\nEmail: {}\nRole:  {}",
        user.full_name, user.email, user.role
    )
}

fn print_user(user: &UserInfo, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.format(), user, user_detail, |u| u.email.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(dashboard: &Dashboard, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => util::prompt_text("Email")?,
    };
    // Fail on a malformed address before asking for the password.
    validate::email(email.trim())?;

    let password = if args.password_stdin {
        let mut lines = util::read_stdin_lines(1)?;
        SecretString::from(lines.remove(0))
    } else {
        util::prompt_secret("Password: ")?
    };

    let user = dashboard.login(email.trim(), &password).await?;
    output::status(global, &format!("Logged in as {} ({})", user.full_name, user.role));
    print_user(&user, global)
}

pub async fn logout(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    if !dashboard.session().is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }
    dashboard.logout().await?;
    output::status(global, "Logged out");
    Ok(())
}

pub fn whoami(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let session = dashboard.session();
    match session.user {
        Some(ref user) if session.is_authenticated() => print_user(user, global),
        _ => Err(CliError::NotLoggedIn),
    }
}

pub async fn profile(dashboard: &Dashboard, args: ProfileArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Edit { full_name, email } => {
            if !dashboard.session().is_authenticated() {
                return Err(CliError::NotLoggedIn);
            }
            let request = EditUserRequest { full_name, email };
            let user = dashboard.edit_profile(&request).await?;
            output::status(global, "Profile updated");
            print_user(&user, global)
        }
    }
}

pub async fn password(dashboard: &Dashboard, args: PasswordArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if !dashboard.session().is_authenticated() {
        return Err(CliError::NotLoggedIn);
    }

    let request = if args.stdin {
        let lines = util::read_stdin_lines(3)?;
        let [old, new, confirm] = <[String; 3]>::try_from(lines).map_err(|_| CliError::Validation {
            field: "stdin".into(),
            reason: "expected current, new and confirmation passwords".into(),
        })?;
        ChangePasswordRequest {
            old_password: SecretString::from(old),
            new_password: SecretString::from(new),
            confirm_password: SecretString::from(confirm),
        }
    } else {
        ChangePasswordRequest {
            old_password: util::prompt_secret("Current password: ")?,
            new_password: util::prompt_secret("New password: ")?,
            confirm_password: util::prompt_secret("Confirm new password: ")?,
        }
    };

    dashboard.change_password(&request).await?;
    output::status(global, "Password changed. Log in again with: hrdash login");
    Ok(())
}
