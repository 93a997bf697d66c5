//! ionic-angular backend adapter
//!
//! Drives the project-local `ionic-app-scripts serve` binary. Unlike the
//! ionic1 tooling it understands a build target and platform, and browser
//! opening is suppressed here so the reporter can do it once.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::config::ServeConfig;
use crate::errors::{IonbrewError, Result};
use crate::models::ServeDetails;

use super::{AppScriptsBackend, collect_external_addresses, detach_child, stream_child_output, wait_for_server};

const LOG_TAG: &str = "app-scripts dev server";

/// Child-process backend for ionic-angular projects
pub struct AppScriptsServeBackend;

impl AppScriptsServeBackend {
    fn serve_binary(project_dir: &Path) -> Result<PathBuf> {
        let binary_name = if cfg!(windows) {
            "ionic-app-scripts.cmd"
        } else {
            "ionic-app-scripts"
        };
        let binary = project_dir
            .join("node_modules")
            .join(".bin")
            .join(binary_name);

        if !binary.exists() {
            return Err(IonbrewError::Backend(format!(
                "ionic-app-scripts is not installed in {}. Run \"npm install\" and try again.",
                project_dir.display()
            )));
        }
        Ok(binary)
    }
}

#[async_trait]
impl AppScriptsBackend for AppScriptsServeBackend {
    async fn serve(
        &self,
        project_dir: &Path,
        config: &ServeConfig,
        target: Option<&str>,
        platform: Option<&str>,
    ) -> Result<ServeDetails> {
        let binary = Self::serve_binary(project_dir)?;

        let mut cmd = Command::new(&binary);
        cmd.arg("serve")
            .arg("--address")
            .arg(&config.bind_address)
            .arg("--port")
            .arg(config.port.to_string())
            .arg("--liveReloadPort")
            .arg(config.livereload_port.to_string())
            .arg("--devLoggerPort")
            .arg(config.notification_port.to_string())
            .arg("--nobrowser");

        if config.console_logs {
            cmd.arg("--consolelogs");
        }
        if !config.live_reload {
            cmd.arg("--nolivereload");
        }
        if config.lab {
            cmd.arg("--lab");
        }
        if let Some(environment) = &config.environment {
            cmd.arg("--env").arg(environment);
        }
        if let Some(target) = target {
            cmd.arg("--target").arg(target);
        }
        if let Some(platform) = platform {
            cmd.arg("--platform").arg(platform);
        }

        cmd.current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        log::debug!(
            "Spawning {} serve in {}",
            binary.display(),
            project_dir.display()
        );
        let mut child = cmd.spawn().map_err(|e| {
            IonbrewError::Backend(format!(
                "Failed to spawn {}: {}",
                binary.display(),
                e
            ))
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
