//! Server backend adapters
//!
//! One adapter per serveable project type. The two adapters take materially
//! different option shapes (the app-scripts one understands a build target
//! and platform), so they are separate traits held in a closed [`Backends`]
//! struct rather than an open handler registry.

pub mod app_scripts;
pub mod ionic1;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::process::Child;

use crate::config::{DEFAULT_ADDRESS, ServeConfig};
use crate::errors::{IonbrewError, Result};
use crate::models::ServeDetails;
use crate::utils::net;

/// How long an adapter waits for its dev server to start listening
const STARTUP_TIMEOUT: Duration = Duration::from_secs(60);
const STARTUP_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Backend adapter for ionic1 projects
#[async_trait]
pub trait Ionic1Backend: Send + Sync {
    /// Start the v1 dev server and report what ended up bound
    async fn serve(&self, project_dir: &Path, config: &ServeConfig) -> Result<ServeDetails>;
}

/// Backend adapter for ionic-angular projects
#[async_trait]
pub trait AppScriptsBackend: Send + Sync {
    /// Start the app-scripts dev server, optionally for a build target and
    /// platform, and report what ended up bound
    async fn serve(
        &self,
        project_dir: &Path,
        config: &ServeConfig,
        target: Option<&str>,
        platform: Option<&str>,
    ) -> Result<ServeDetails>;
}

/// Closed set of server backends used by the dispatcher
pub struct Backends {
    pub ionic1: Box<dyn Ionic1Backend>,
    pub app_scripts: Box<dyn AppScriptsBackend>,
}

impl Backends {
    /// The child-process backends used by the CLI
    pub fn process_backends() -> Self {
        Self {
            ionic1: Box::new(ionic1::Ionic1ScriptBackend),
            app_scripts: Box::new(app_scripts::AppScriptsServeBackend),
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::process_backends()
    }
}

/// Stream a child's stdout/stderr lines through the logger
///
/// With `server_logs` set the lines are surfaced at info/warn; otherwise
/// they stay at debug so `-v` can still reach them.
pub(crate) fn stream_child_output(child: &mut Child, server_logs: bool, tag: &'static str) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if server_logs {
                    log::info!("[{}] {}", tag, line);
                } else {
                    log::debug!("[{}] {}", tag, line);
                }
            }
        });
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if server_logs {
                    log::warn!("[{}] {}", tag, line);
                } else {
                    log::debug!("[{}] {}", tag, line);
                }
            }
        });
    }
}

/// Wait until the dev server accepts TCP connections on its port
///
/// Fails fast when the child exits before the port opens, and after
/// [`STARTUP_TIMEOUT`] otherwise.
pub(crate) async fn wait_for_server(
    child: &mut Child,
    bind_address: &str,
    port: u16,
    tag: &'static str,
) -> Result<()> {
    let connect_host = if bind_address == DEFAULT_ADDRESS {
        "127.0.0.1"
    } else {
        bind_address
    };

    let deadline = tokio::time::Instant::now() + STARTUP_TIMEOUT;
    loop {
        if let Some(status) = child.try_wait().map_err(IonbrewError::Io)? {
            return Err(IonbrewError::Backend(format!(
                "{} exited with {} before the dev server started listening on port {}",
                tag, status, port
            )));
        }

        if TcpStream::connect((connect_host, port)).await.is_ok() {
            return Ok(());
        }

        if tokio::time::Instant::now() >= deadline {
            return Err(IonbrewError::Backend(format!(
                "{} did not start listening on {}:{} within {}s",
                tag,
                connect_host,
                port,
                STARTUP_TIMEOUT.as_secs()
            )));
        }

        tokio::time::sleep(STARTUP_POLL_INTERVAL).await;
    }
}

/// Keep the detached dev server child reaped after the adapter returns
pub(crate) fn detach_child(mut child: Child, tag: &'static str) {
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => log::info!("{} exited with {}", tag, status),
            Err(e) => log::warn!("Failed to wait on {}: {}", tag, e),
        }
    });
}

/// Externally reachable addresses for the serve details
///
/// Enumerated when the server is bound to all interfaces or an external
/// address was explicitly required; a concrete non-loopback bind address is
/// itself the reachable address; loopback binds expose nothing external.
pub(crate) fn collect_external_addresses(config: &ServeConfig) -> Vec<String> {
    if config.bind_address == DEFAULT_ADDRESS || config.external_address_required {
        net::external_ipv4_addresses()
    } else if config.bind_address == "localhost" || config.bind_address.starts_with("127.") {
        Vec::new()
    } else {
        vec![config.bind_address.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawServeOptions;

    #[test]
    fn test_collect_external_addresses_loopback_bind_is_empty() {
        let config = ServeConfig::normalize(RawServeOptions {
            address: Some("127.0.0.1".to_string()),
            ..Default::default()
        });
        assert!(collect_external_addresses(&config).is_empty());
    }

    #[test]
    fn test_collect_external_addresses_concrete_bind_is_reported() {
        let config = ServeConfig::normalize(RawServeOptions {
            address: Some("192.168.1.20".to_string()),
            ..Default::default()
        });
        assert_eq!(
            collect_external_addresses(&config),
            vec!["192.168.1.20".to_string()]
        );
    }
}
