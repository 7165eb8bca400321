//! Clap derive structures for the `hrdash` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hrdash -- command-line client for the HR administration API
#[derive(Debug, Parser)]
#[command(
    name = "hrdash",
    version,
    about = "Manage departments, employees, projects and dependents from the command line",
    long_about = "A CLI for the HR administration REST API.\n\n\
        Log in once per profile; the session is stored locally and reused\n\
        until you log out or the server rejects the token.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "HRDASH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "HRDASH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "HRDASH_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "HRDASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session for this profile
    Login(LoginArgs),

    /// End the session on the server and forget it locally
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Edit the signed-in user's profile
    Profile(ProfileArgs),

    /// Change the signed-in user's password (ends the session)
    Password(PasswordArgs),

    /// Manage departments
    #[command(alias = "dept")]
    Departments(DepartmentsArgs),

    /// Manage employees
    #[command(alias = "emp")]
    Employees(EmployeesArgs),

    /// Manage projects
    #[command(alias = "proj")]
    Projects(ProjectsArgs),

    /// Manage employee dependents
    #[command(alias = "dep")]
    Dependents(DependentsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Update name and/or email
    Edit {
        /// New full name
        #[arg(long)]
        full_name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Read old, new and confirmation passwords from three lines of stdin
    #[arg(long)]
    pub stdin: bool,
}

// ── Shared resource arguments ────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub page: String,

    /// Rows per page
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    pub size: String,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Text to search for
    pub text: String,

    /// Fields to search (comma-separated) [default: all]
    #[arg(long = "in", value_delimiter = ',')]
    pub fields: Vec<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

// ── Departments ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DepartmentsArgs {
    #[command(subcommand)]
    pub command: DepartmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentsCommand {
    /// List one page of departments
    #[command(alias = "ls")]
    List(PageArgs),

    /// Search departments on the server
    Search(SearchArgs),

    /// Create a department
    Create(DepartmentFields),

    /// Replace a department
    Update {
        #[command(flatten)]
        fields: DepartmentFields,

        /// Read the department from a JSON file instead of flags
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a department by number
    #[command(alias = "rm")]
    Delete {
        /// Department number
        dnum: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DepartmentFields {
    /// Department number
    #[arg(long)]
    pub dnum: Option<String>,

    /// Department name
    #[arg(long)]
    pub name: Option<String>,

    /// SSN of the supervising employee
    #[arg(long)]
    pub supervisor_ssn: Option<String>,

    /// Date the supervisor started (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,
}

// ── Employees ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List one page of employees
    #[command(alias = "ls")]
    List(PageArgs),

    /// Search employees on the server
    Search(SearchArgs),

    /// Create an employee
    Create(EmployeeFields),

    /// Replace an employee
    Update {
        #[command(flatten)]
        fields: EmployeeFields,

        /// Read the employee from a JSON file instead of flags
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete an employee by SSN
    #[command(alias = "rm")]
    Delete {
        /// Employee SSN
        ssn: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EmployeeFields {
    /// Social security number (9 digits)
    #[arg(long)]
    pub ssn: Option<String>,

    /// Full name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birthdate: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Sex
    #[arg(long)]
    pub sex: Option<String>,

    /// Salary
    #[arg(long)]
    pub salary: Option<String>,

    /// SSN of the employee's manager
    #[arg(long)]
    pub manager_ssn: Option<String>,

    /// Department number
    #[arg(long)]
    pub department: Option<String>,
}

// ── Projects ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List one page of projects
    #[command(alias = "ls")]
    List(PageArgs),

    /// Search projects on the server
    Search(SearchArgs),

    /// Create a project
    Create(ProjectFields),

    /// Replace a project
    Update {
        #[command(flatten)]
        fields: ProjectFields,

        /// Read the project from a JSON file instead of flags
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a project by ID
    #[command(alias = "rm")]
    Delete {
        /// Project ID
        id: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProjectFields {
    /// Project ID
    #[arg(long)]
    pub id: Option<String>,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Location
    #[arg(long)]
    pub location: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Controlling department number
    #[arg(long)]
    pub department: Option<String>,

    /// Assigned employee SSNs (comma-separated)
    #[arg(long = "employee", value_delimiter = ',')]
    pub employees: Vec<String>,
}

// ── Dependents ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DependentsArgs {
    #[command(subcommand)]
    pub command: DependentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DependentsCommand {
    /// List one page of dependents
    #[command(alias = "ls")]
    List(PageArgs),

    /// Search dependents on the server
    Search(SearchArgs),

    /// Create a dependent
    Create(DependentFields),

    /// Replace a dependent
    Update {
        #[command(flatten)]
        fields: DependentFields,

        /// Read the dependent from a JSON file instead of flags
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a dependent by employee SSN and name
    #[command(alias = "rm")]
    Delete {
        /// SSN of the employee the dependent belongs to
        employee_ssn: i64,

        /// Dependent name
        name: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DependentFields {
    /// SSN of the employee the dependent belongs to
    #[arg(long)]
    pub employee_ssn: Option<String>,

    /// Dependent name
    #[arg(long)]
    pub name: Option<String>,

    /// Sex
    #[arg(long)]
    pub sex: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birthdate: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file
    Init {
        /// Profile name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// API base URL for the profile (prompted when omitted)
        #[arg(long = "url")]
        url: Option<String>,
    },

    /// Show the effective configuration
    Show,

    /// Set a configuration value
    ///
    /// Keys: default_profile, defaults.output, defaults.color,
    /// defaults.timeout, base_url, timeout. The last two apply to the
    /// active profile.
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
