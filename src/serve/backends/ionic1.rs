//! ionic1 backend adapter
//!
//! Drives the project's own v1 dev tooling through its `ionic:serve` npm
//! script. The tooling owns the HTTP server, file watching, live reload and
//! browser opening; this adapter only launches it and waits for the port.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ServeConfig;
use crate::errors::{IonbrewError, Result};
use crate::models::ServeDetails;

use super::{Ionic1Backend, collect_external_addresses, detach_child, stream_child_output, wait_for_server};

/// npm script expected to launch the v1 dev server
pub const SERVE_SCRIPT: &str = "ionic:serve";

const LOG_TAG: &str = "ionic1 dev server";

#[derive(Debug, Default, Deserialize)]
struct PackageScripts {
    #[serde(default)]
    scripts: HashMap<String, String>,
}

/// Child-process backend for ionic1 projects
pub struct Ionic1ScriptBackend;

impl Ionic1ScriptBackend {
    fn check_serve_script(project_dir: &Path) -> Result<()> {
        let package_path = project_dir.join("package.json");
        let content = fs::read_to_string(&package_path).map_err(|e| {
            IonbrewError::Backend(format!(
                "Failed to read {}: {}",
                package_path.display(),
                e
            ))
        })?;
        let package: PackageScripts = serde_json::from_str(&content).map_err(|e| {
            IonbrewError::Backend(format!(
                "Failed to parse {}: {}",
                package_path.display(),
                e
            ))
        })?;

        if !package.scripts.contains_key(SERVE_SCRIPT) {
            return Err(IonbrewError::Backend(format!(
                "{} has no \"{}\" script. Add one that launches the project's dev server.",
                package_path.display(),
                SERVE_SCRIPT
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Ionic1Backend for Ionic1ScriptBackend {
    async fn serve(&self, project_dir: &Path, config: &ServeConfig) -> Result<ServeDetails> {
        Self::check_serve_script(project_dir)?;
        let npm = which::which("npm").map_err(|_| {
            IonbrewError::Backend(
                "npm was not found in PATH. Install Node.js to serve this project.".to_string(),
            )
        })?;

        let mut cmd = Command::new(npm);
        cmd.arg("run")
            .arg(SERVE_SCRIPT)
            .arg("--")
            .arg("--address")
            .arg(&config.bind_address)
            .arg("--port")
            .arg(config.port.to_string())
            .arg("--livereload-port")
            .arg(config.livereload_port.to_string());

        if config.console_logs {
            cmd.arg("--consolelogs");
        }
        if config.server_logs {
            cmd.arg("--serverlogs");
        }
        if !config.live_reload {
            cmd.arg("--nolivereload");
        }
        if !config.proxy {
            cmd.arg("--noproxy");
        }
        if config.lab {
            cmd.arg("--lab");
        }
        if let Some((_, password)) = &config.basic_auth {
            cmd.arg("--auth").arg(password);
        }

        // Browser opening belongs to the v1 tooling, not to the reporter.
        if config.open {
            if let Some(browser) = &config.browser {
                cmd.arg("--browser").arg(browser);
            }
        } else {
            cmd.arg("--nobrowser");
        }

        cmd.current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        log::debug!("Spawning npm run {} in {}", SERVE_SCRIPT, project_dir.display());
        let mut child = cmd.spawn().map_err(|e| {
            IonbrewError::Backend(format!("Failed to spawn npm run {}: {}", SERVE_SCRIPT, e))
        })?;

        stream_child_output(&mut child, config.server_logs, LOG_TAG);
        wait_for_server(&mut child, &config.bind_address, config.port, LOG_TAG).await?;
        detach_child(child, LOG_TAG);

        Ok(ServeDetails {
            port: config.port,
            external_addresses: collect_external_addresses(config),
        })
    }
}
