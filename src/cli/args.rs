//! Command line argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::RawServeOptions;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "ionbrew")]
#[command(about = "🍋 Mobile-Web Dev Server Launcher - serve ionic1 and ionic-angular projects with DevApp discovery")]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease logging verbosity (only errors)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Start a local dev server for the project
    Serve(ServeArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ServeArgs {
    /// Path to project directory (defaults to current directory)
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Network address to bind the dev server to
    #[arg(long)]
    pub address: Option<String>,

    /// Dev server port
    #[arg(short = 'p', long)]
    pub port: Option<String>,

    /// Live-reload port
    #[arg(short = 'r', long = "livereload-port")]
    pub livereload_port: Option<String>,

    /// Dev logger notification port
    #[arg(long = "dev-logger-port")]
    pub dev_logger_port: Option<String>,

    /// Print app console logs to the terminal
    #[arg(short = 'c', long)]
    pub consolelogs: bool,

    /// Print dev server logs to the terminal
    #[arg(short = 's', long)]
    pub serverlogs: bool,

    /// Disable live reload
    #[arg(long)]
    pub nolivereload: bool,

    /// Disable proxy support
    #[arg(long)]
    pub noproxy: bool,

    /// Serve the Ionic Lab interface
    #[arg(short = 'l', long)]
    pub lab: bool,

    /// Open a browser once the server is reachable
    #[arg(short = 'b', long)]
    pub open: bool,

    /// Browser application to open
    #[arg(short = 'w', long)]
    pub browser: Option<String>,

    /// Literal fragment appended to the opened URL
    #[arg(short = 'o', long = "browseroption")]
    pub browseroption: Option<String>,

    /// Enable HTTP basic auth with the given password
    #[arg(long)]
    pub auth: Option<String>,

    /// Build environment name passed to the dev server
    #[arg(long = "env")]
    pub environment: Option<String>,

    /// Target platform (ios, android)
    #[arg(long)]
    pub platform: Option<String>,

    /// Disable the DevApp discovery announcement
    #[arg(long = "no-devapp")]
    pub no_devapp: bool,

    /// Require an externally reachable address
    #[arg(long = "external")]
    pub external: bool,

    /// Serve for Cordova native tooling
    #[arg(long = "cordova")]
    pub cordova: bool,
}

impl ServeArgs {
    /// Map parsed flags onto the loosely-typed options the normalizer takes
    ///
    /// Plain flags can only assert presence, so they map to `Some(true)` /
    /// `None`; the `no*` opt-outs map to `Some(false)` / `None`.
    pub fn into_raw_options(self) -> RawServeOptions {
        RawServeOptions {
            address: self.address,
            port: self.port,
            livereload_port: self.livereload_port,
            dev_logger_port: self.dev_logger_port,
            console_logs: self.consolelogs.then_some(true),
            server_logs: self.serverlogs.then_some(true),
            live_reload: if self.nolivereload { Some(false) } else { None },
            proxy: if self.noproxy { Some(false) } else { None },
            lab: self.lab.then_some(true),
            open: self.open.then_some(true),
            is_cordova_serve: self.cordova.then_some(true),
            external_address_required: self.external.then_some(true),
            devapp: if self.no_devapp { Some(false) } else { None },
            browser: self.browser,
            browser_option: self.browseroption,
            auth: self.auth,
            environment: self.environment,
            platform: self.platform,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_options_default_flags_stay_absent() {
        let raw = ServeArgs::default().into_raw_options();

        assert!(raw.console_logs.is_none());
        assert!(raw.live_reload.is_none());
        assert!(raw.proxy.is_none());
        assert!(raw.devapp.is_none());
        assert!(raw.open.is_none());
    }

    #[test]
    fn test_raw_options_optouts_become_explicit_false() {
        let args = ServeArgs {
            nolivereload: true,
            noproxy: true,
            no_devapp: true,
            ..Default::default()
        };
        let raw = args.into_raw_options();

        assert_eq!(raw.live_reload, Some(false));
        assert_eq!(raw.proxy, Some(false));
        assert_eq!(raw.devapp, Some(false));
    }

    #[test]
    fn test_raw_options_flags_become_explicit_true() {
        let args = ServeArgs {
            consolelogs: true,
            lab: true,
            open: true,
            external: true,
            cordova: true,
            ..Default::default()
        };
        let raw = args.into_raw_options();

        assert_eq!(raw.console_logs, Some(true));
        assert_eq!(raw.lab, Some(true));
        assert_eq!(raw.open, Some(true));
        assert_eq!(raw.external_address_required, Some(true));
        assert_eq!(raw.is_cordova_serve, Some(true));
    }
}
