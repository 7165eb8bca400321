mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hrdash_core::Dashboard;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    config::apply_defaults(&mut cli.global, &cfg);

    match cli.command {
        // Config commands don't need an API connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, cfg),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hrdash", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let (profile, dashboard_config) = config::resolve_dashboard_config(&cli.global, &cfg)?;
            let storage = Arc::new(config::FileSessionStorage::for_profile(&profile));
            tracing::debug!(
                %profile,
                base_url = %dashboard_config.base_url,
                session = %storage.path().display(),
                "dashboard configured"
            );
            let dashboard = Dashboard::new(&dashboard_config, storage)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &dashboard, &cli.global).await
        }
    }
}
