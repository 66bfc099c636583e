mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meraki_api::DashboardClient;

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
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands: no Dashboard session needed
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),
        Command::Cmx(ref args) => commands::cmx::handle(args, &cli.global),

        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "meraki", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load()?;
            let session = config::resolve_session(&cli.global, &cfg)?;
            let client = DashboardClient::from_api_key(
                &session.api.api_url,
                &session.api.api_key,
                &session.transport,
            )?;

            tracing::debug!(
                command = ?cmd,
                base_url = %client.base_url(),
                network_id = %session.api.network_id,
                "dispatching command"
            );
            commands::dispatch(cmd, &client, &session.api.network_id, &cli.global).await
        }
    }
}
