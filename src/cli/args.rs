//! Shared CLI argument types

use clap::ValueEnum;

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON with a data/meta envelope
    Json,
}
