//! ionbrew binary entry point

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ionbrew::cli::run().await
}
