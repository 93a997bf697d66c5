//! DevApp discovery announcement over mDNS
//!
//! Advertises the running dev server so companion DevApp tooling on the
//! local network can find it. Discovery is a convenience: it is attempted
//! once per serve session, and any failure to construct, register, or run
//! the service is logged and swallowed rather than surfaced to the serve
//! flow.

use mdns_sd::{ServiceDaemon, ServiceInfo};

use crate::config::ServeConfig;
use crate::errors::{IonbrewError, Result};
use crate::utils::net;

/// mDNS service type for DevApp discovery
pub const DEVAPP_SERVICE_TYPE: &str = "_devapp._tcp.local.";
/// Path suffix marking dev-app mode, carried as a TXT record
pub const DEVAPP_PATH: &str = "/?devapp=true";

/// Whether the announcement should run for this configuration
///
/// Cordova serves are driven by native tooling and must not be advertised,
/// regardless of the devapp setting.
pub fn should_announce(config: &ServeConfig) -> bool {
    config.devapp_enabled && !config.is_cordova_serve
}

/// Fire-and-forget DevApp announcement
///
/// Spawned off the main flow; the task holds the mDNS daemon for the rest of
/// the session and drains its event channel so runtime errors are observed
/// but never raised.
pub fn spawn_devapp_announcement(project_name: String, port: u16) {
    tokio::spawn(async move {
        let daemon = match announce_devapp(&project_name, port) {
            Ok(daemon) => daemon,
            Err(e) => {
                log::warn!("DevApp discovery unavailable: {}", e);
                return;
            }
        };

        match daemon.monitor() {
            Ok(monitor) => {
                while let Ok(event) = monitor.recv_async().await {
                    log::debug!("DevApp mDNS daemon event: {:?}", event);
                }
            }
            Err(e) => {
                log::warn!("DevApp mDNS daemon monitor unavailable: {}", e);
                // Keep the daemon alive for the session even without events.
                std::future::pending::<()>().await;
            }
        }
    });
}

/// Register the DevApp service with the mDNS daemon
///
/// The instance name is `{projectName}@{port}` so companion tooling can show
/// which project a discovered server belongs to.
pub fn announce_devapp(project_name: &str, port: u16) -> Result<ServiceDaemon> {
    let daemon = ServiceDaemon::new()
        .map_err(|e| IonbrewError::Discovery(format!("Failed to create mDNS daemon: {}", e)))?;

    let instance_name = format!("{}@{}", project_name, port);

    // Hostname must end with .local. as required by mDNS
    let hostname = {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "ionbrew".to_string());
        let base_host = host.trim_end_matches(".local").trim_end_matches(".");
        format!("{}.local.", base_host)
    };

    let addresses = net::local_addresses();
    if addresses.is_empty() {
        return Err(IonbrewError::Discovery(
            "No network interfaces found for mDNS registration".to_string(),
        ));
    }

    let service_info = ServiceInfo::new(
        DEVAPP_SERVICE_TYPE,
        &instance_name,
        &hostname,
        &addresses[..],
        port,
        &[("path", DEVAPP_PATH)][..],
    )
    .map_err(|e| IonbrewError::Discovery(format!("Failed to create service info: {}", e)))?;

    daemon
        .register(service_info)
        .map_err(|e| IonbrewError::Discovery(format!("Failed to register mDNS service: {}", e)))?;

    log::info!(
        "📡 DevApp service registered: {} ({})",
        instance_name,
        DEVAPP_SERVICE_TYPE
    );

    Ok(daemon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawServeOptions;

    fn config(devapp: Option<bool>, cordova: Option<bool>) -> ServeConfig {
        ServeConfig::normalize(RawServeOptions {
            devapp,
            is_cordova_serve: cordova,
            ..Default::default()
        })
    }

    #[test]
    fn test_announce_by_default() {
        assert!(should_announce(&config(None, None)));
        assert!(should_announce(&config(Some(true), Some(false))));
    }

    #[test]
    fn test_no_announce_when_devapp_disabled() {
        assert!(!should_announce(&config(Some(false), None)));
    }

    #[test]
    fn test_no_announce_for_cordova_serve_regardless_of_devapp() {
        assert!(!should_announce(&config(Some(true), Some(true))));
        assert!(!should_announce(&config(None, Some(true))));
    }
}
