//! Serve command implementation

use anyhow::Result;

use crate::cli::args::ServeArgs;
use crate::serve::{self, PreServeHook, backends::Backends};

/// Execute the serve command
///
/// Runs one serve session and then keeps the process alive until Ctrl+C so
/// the spawned dev server stays supervised.
pub async fn execute_serve_command(mut args: ServeArgs) -> Result<()> {
    let project_dir = match args.project_dir.take() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let backends = Backends::process_backends();
    let hooks: Vec<PreServeHook> = Vec::new();

    let details =
        serve::run_serve(&project_dir, args.into_raw_options(), &backends, &hooks).await?;
    log::debug!(
        "Serve session established on port {} ({} external addresses)",
        details.port,
        details.external_addresses.len()
    );

    println!("Press Ctrl+C to stop the dev server");
    tokio::signal::ctrl_c().await?;
    println!("🛑 Stopping dev server");
    Ok(())
}
