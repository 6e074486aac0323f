//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod alert;
pub mod args;
pub mod context;
pub mod init;
pub mod server;
pub mod status;

pub use args::OutputFormat;
#[allow(unused_imports)]
pub use context::CommandContext;

/// nezhactl - terminal companion for Nezha monitoring dashboards
#[derive(Parser, Debug)]
#[command(name = "nezhactl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "NEZHACTL_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "NEZHACTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "NEZHACTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize nezhactl configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Inspect monitored servers
    #[command(subcommand)]
    Server(ServerCommands),

    /// Inspect alert rules
    #[command(subcommand)]
    Alert(AlertCommands),
}

/// Server subcommands
#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// List all servers in the fleet
    List,

    /// Show one server by ID
    Get {
        /// Server ID as shown by `server list`
        id: u64,
    },
}

/// Alert subcommands
#[derive(Subcommand, Debug)]
pub enum AlertCommands {
    /// List configured alert rules
    List,
}
