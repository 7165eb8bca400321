//! Command dispatch: bridges CLI args -> dashboard actions -> output formatting.

pub mod auth;
pub mod config_cmd;
pub mod departments;
pub mod dependents;
pub mod employees;
pub mod projects;
pub mod resources;
pub mod util;

use hrdash_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(dashboard, args, global).await,
        Command::Logout => auth::logout(dashboard, global).await,
        Command::Whoami => auth::whoami(dashboard, global),
        Command::Profile(args) => auth::profile(dashboard, args, global).await,
        Command::Password(args) => auth::password(dashboard, args, global).await,
        Command::Departments(args) => departments::handle(dashboard, args, global).await,
        Command::Employees(args) => employees::handle(dashboard, args, global).await,
        Command::Projects(args) => projects::handle(dashboard, args, global).await,
        Command::Dependents(args) => dependents::handle(dashboard, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
