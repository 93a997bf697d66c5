//! Serve session orchestration
//!
//! One serve session is a linear flow: fire pre-serve hooks, normalize the
//! raw options, load the project descriptor, dispatch to the project-type
//! backend, announce the server for DevApp discovery (best effort), report
//! reachable addresses and optionally open a browser. The resulting
//! [`ServeDetails`] is returned to the caller so further tooling can chain
//! on it.

pub mod backends;
pub mod discovery;
pub mod report;

use std::path::Path;

use crate::config::{RawServeOptions, ServeConfig};
use crate::errors::{IonbrewError, Result};
use crate::models::{ProjectInfo, ProjectType, ServeDetails};
use crate::project::{self, PROJECT_FILE};

use self::backends::Backends;

/// Target passed to the app-scripts backend when serving for Cordova
pub const CORDOVA_TARGET: &str = "cordova";

/// Pre-serve hook, fired once before any other serve work
///
/// Return values are not inspected for control flow; a failing hook is
/// logged and the session continues.
pub type PreServeHook = Box<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Run one serve session end to end
pub async fn run_serve(
    project_dir: &Path,
    raw: RawServeOptions,
    backends: &Backends,
    hooks: &[PreServeHook],
) -> anyhow::Result<ServeDetails> {
    for hook in hooks {
        if let Err(e) = hook() {
            log::warn!("Pre-serve hook failed: {}", e);
        }
    }

    let config = ServeConfig::normalize(raw);
    let project = project::load_project(project_dir)?;

    log::info!(
        "Starting dev server for '{}' ({}) on {}:{}",
        project.name,
        project.project_type,
        config.bind_address,
        config.port
    );

    let details = dispatch(project_dir, &project, &config, backends).await?;

    if discovery::should_announce(&config) {
        discovery::spawn_devapp_announcement(project.name.clone(), details.port);
    }

    println!("{}", report::format_serve_summary(&details, &config));

    // The ionic1 dev tooling opens the browser itself; opening here as well
    // would double-open.
    if config.open && project.project_type != ProjectType::Ionic1 {
        let url = report::browser_url(&config.local_url(), &config);
        report::open_browser(&url, config.browser.as_deref());
    }

    Ok(details)
}

/// Select and invoke the server backend for the project type
///
/// Closed dispatch: exactly one backend per serveable type, and anything
/// else is a fatal configuration error before any backend runs.
pub async fn dispatch(
    project_dir: &Path,
    project: &ProjectInfo,
    config: &ServeConfig,
    backends: &Backends,
) -> Result<ServeDetails> {
    match &project.project_type {
        ProjectType::Ionic1 => backends.ionic1.serve(project_dir, config).await,
        ProjectType::IonicAngular => {
            let target = config.is_cordova_serve.then_some(CORDOVA_TARGET);
            backends
                .app_scripts
                .serve(project_dir, config, target, config.platform.as_deref())
                .await
        }
        other => Err(IonbrewError::Config(format!(
            "Cannot serve a project of type \"{}\". Remove the \"type\" attribute from {} to let project detection choose a server backend.",
            other, PROJECT_FILE
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use super::backends::{AppScriptsBackend, Ionic1Backend};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct SpyState {
        ionic1_calls: AtomicUsize,
        app_scripts_calls: AtomicUsize,
        last_target: Mutex<Option<String>>,
        last_platform: Mutex<Option<String>>,
    }

    struct SpyIonic1(Arc<SpyState>);
    struct SpyAppScripts(Arc<SpyState>);

    #[async_trait]
    impl Ionic1Backend for SpyIonic1 {
        async fn serve(&self, _project_dir: &Path, config: &ServeConfig) -> Result<ServeDetails> {
            self.0.ionic1_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ServeDetails {
                port: config.port,
                external_addresses: vec!["192.168.1.5".to_string()],
            })
        }
    }

    #[async_trait]
    impl AppScriptsBackend for SpyAppScripts {
        async fn serve(
            &self,
            _project_dir: &Path,
            config: &ServeConfig,
            target: Option<&str>,
            platform: Option<&str>,
        ) -> Result<ServeDetails> {
            self.0.app_scripts_calls.fetch_add(1, Ordering::SeqCst);
            *self.0.last_target.lock().unwrap() = target.map(str::to_string);
            *self.0.last_platform.lock().unwrap() = platform.map(str::to_string);
            Ok(ServeDetails {
                port: config.port,
                external_addresses: Vec::new(),
            })
        }
    }

    fn spy_backends() -> (Arc<SpyState>, Backends) {
        let state = Arc::new(SpyState::default());
        let backends = Backends {
            ionic1: Box::new(SpyIonic1(state.clone())),
            app_scripts: Box::new(SpyAppScripts(state.clone())),
        };
        (state, backends)
    }

    fn project(project_type: ProjectType) -> ProjectInfo {
        ProjectInfo {
            name: "conference".to_string(),
            project_type,
        }
    }

    #[tokio::test]
    async fn test_dispatch_ionic1_invokes_v1_backend_unmodified() {
        let (state, backends) = spy_backends();
        let config = ServeConfig::normalize(RawServeOptions::default());

        let details = dispatch(
            Path::new("."),
            &project(ProjectType::Ionic1),
            &config,
            &backends,
        )
        .await
        .unwrap();

        assert_eq!(details.port, config.port);
        assert_eq!(state.ionic1_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.app_scripts_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dispatch_ionic_angular_augments_cordova_target() {
        let (state, backends) = spy_backends();
        let config = ServeConfig::normalize(RawServeOptions {
            is_cordova_serve: Some(true),
            platform: Some("ios".to_string()),
            ..Default::default()
        });

        dispatch(
            Path::new("."),
            &project(ProjectType::IonicAngular),
            &config,
            &backends,
        )
        .await
        .unwrap();

        assert_eq!(state.app_scripts_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            state.last_target.lock().unwrap().as_deref(),
            Some(CORDOVA_TARGET)
        );
        assert_eq!(state.last_platform.lock().unwrap().as_deref(), Some("ios"));
    }

    #[tokio::test]
    async fn test_dispatch_ionic_angular_without_cordova_leaves_target_unset() {
        let (state, backends) = spy_backends();
        let config = ServeConfig::normalize(RawServeOptions::default());

        dispatch(
            Path::new("."),
            &project(ProjectType::IonicAngular),
            &config,
            &backends,
        )
        .await
        .unwrap();

        assert!(state.last_target.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_custom_type_fails_without_invoking_backends() {
        let (state, backends) = spy_backends();
        let config = ServeConfig::normalize(RawServeOptions::default());

        let err = dispatch(
            Path::new("."),
            &project(ProjectType::Custom),
            &config,
            &backends,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, IonbrewError::Config(_)));
        assert!(err.to_string().contains("custom"));
        assert!(err.to_string().contains(PROJECT_FILE));
        assert_eq!(state.ionic1_calls.load(Ordering::SeqCst), 0);
        assert_eq!(state.app_scripts_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_type_names_offending_value() {
        let (_state, backends) = spy_backends();
        let config = ServeConfig::normalize(RawServeOptions::default());

        let err = dispatch(
            Path::new("."),
            &project(ProjectType::Other("react".to_string())),
            &config,
            &backends,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("react"));
    }
}
