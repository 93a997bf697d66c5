//! ionbrew - Mobile-Web Dev Server Launcher
//!
//! ionbrew launches a local development web server for a mobile-web project
//! (ionic1 or ionic-angular), announces it on the local network for DevApp
//! companion tooling, and reports the reachable addresses. The HTTP serving
//! itself is delegated to the project's own dev-server tooling.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod project;
pub mod serve;
pub mod utils;

// Re-export commonly used types
pub use errors::*;
pub use models::*;

/// ionbrew version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// ionbrew application name
pub const APP_NAME: &str = "ionbrew";
