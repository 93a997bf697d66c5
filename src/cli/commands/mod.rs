//! CLI command implementations

pub mod serve;

use crate::cli::args::Commands;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => serve::execute_serve_command(args).await,
    }
}
