//! nezhactl - terminal companion for Nezha monitoring dashboards

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::{AlertCommands, Cli, Commands, ServerCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => cli::init::run(cli.config.as_deref()).await,
        Commands::Status => cli::status::run(cli.config.as_deref()),
        Commands::Version => {
            println!("nezhactl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Server(server_cmd) => match server_cmd {
            ServerCommands::List => cli::server::list(cli.format, cli.config.as_deref()).await,
            ServerCommands::Get { id } => {
                cli::server::get(id, cli.format, cli.config.as_deref()).await
            }
        },
        Commands::Alert(alert_cmd) => match alert_cmd {
            AlertCommands::List => cli::alert::list(cli.format, cli.config.as_deref()).await,
        },
    }
}
