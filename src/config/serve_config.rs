//! Canonical serve configuration and option normalization

/// Bind address used when none is given ("all interfaces")
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";
/// Default dev server port
pub const DEFAULT_SERVER_PORT: u16 = 8100;
/// Default live-reload port
pub const DEFAULT_LIVERELOAD_PORT: u16 = 35729;
/// Default dev-logger notification port
pub const DEFAULT_DEV_LOGGER_PORT: u16 = 53703;
/// Fixed username paired with the `--auth` password
pub const BASIC_AUTH_USERNAME: &str = "ionic";

/// Raw, loosely-typed serve options as they arrive from the user
///
/// Port-like values stay strings here so that unparsable input falls back to
/// the named defaults instead of being rejected upstream. Absent booleans
/// are `None`; each field's default-when-absent rule lives in
/// [`ServeConfig::normalize`].
#[derive(Debug, Clone, Default)]
pub struct RawServeOptions {
    pub address: Option<String>,
    pub port: Option<String>,
    pub livereload_port: Option<String>,
    pub dev_logger_port: Option<String>,
    pub console_logs: Option<bool>,
    pub server_logs: Option<bool>,
    pub live_reload: Option<bool>,
    pub proxy: Option<bool>,
    pub lab: Option<bool>,
    pub open: Option<bool>,
    pub is_cordova_serve: Option<bool>,
    pub external_address_required: Option<bool>,
    pub devapp: Option<bool>,
    pub browser: Option<String>,
    pub browser_option: Option<String>,
    pub auth: Option<String>,
    pub environment: Option<String>,
    pub platform: Option<String>,
}

/// Canonical serve configuration, constructed once per invocation
///
/// Every numeric field holds a valid port and every boolean is concrete;
/// the value is immutable for the lifetime of the serve session.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind_address: String,
    pub port: u16,
    pub livereload_port: u16,
    pub notification_port: u16,
    pub console_logs: bool,
    pub server_logs: bool,
    pub live_reload: bool,
    pub proxy: bool,
    pub lab: bool,
    pub open: bool,
    pub is_cordova_serve: bool,
    pub external_address_required: bool,
    pub devapp_enabled: bool,
    pub browser: Option<String>,
    pub browser_option: Option<String>,
    pub basic_auth: Option<(String, String)>,
    pub environment: Option<String>,
    pub platform: Option<String>,
}

impl ServeConfig {
    /// Normalize raw options into a canonical configuration
    ///
    /// Total over all inputs: absent or unparsable values resolve to the
    /// named defaults, `live_reload`/`proxy`/`devapp` default on unless
    /// explicitly disabled, and the remaining flags default off.
    pub fn normalize(raw: RawServeOptions) -> Self {
        Self {
            bind_address: raw.address.unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port: parse_port(raw.port.as_deref(), DEFAULT_SERVER_PORT),
            livereload_port: parse_port(raw.livereload_port.as_deref(), DEFAULT_LIVERELOAD_PORT),
            notification_port: parse_port(raw.dev_logger_port.as_deref(), DEFAULT_DEV_LOGGER_PORT),
            console_logs: raw.console_logs.unwrap_or(false),
            server_logs: raw.server_logs.unwrap_or(false),
            live_reload: raw.live_reload != Some(false),
            proxy: raw.proxy != Some(false),
            lab: raw.lab.unwrap_or(false),
            open: raw.open.unwrap_or(false),
            is_cordova_serve: raw.is_cordova_serve.unwrap_or(false),
            external_address_required: raw.external_address_required.unwrap_or(false),
            devapp_enabled: raw.devapp != Some(false),
            browser: raw.browser,
            browser_option: raw.browser_option,
            basic_auth: raw
                .auth
                .map(|password| (BASIC_AUTH_USERNAME.to_string(), password)),
            environment: raw.environment,
            platform: raw.platform,
        }
    }

    /// The local URL of the dev server
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

fn parse_port(raw: Option<&str>, default: u16) -> u16 {
    raw.and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(default)
}
