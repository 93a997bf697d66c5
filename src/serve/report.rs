//! Serve result reporting and browser launching

use crate::config::ServeConfig;
use crate::models::ServeDetails;

/// Path of the Ionic Lab interface on the dev server
pub const LAB_PATH: &str = "/ionic-lab";
/// Query prefix appended when opening the browser for a platform
pub const PLATFORM_QUERY: &str = "?ionicplatform=";

/// Format the human-readable serve summary
///
/// Every external address the adapter reported is shown, in order, with no
/// truncation.
pub fn format_serve_summary(details: &ServeDetails, config: &ServeConfig) -> String {
    let mut lines = vec![
        "🚀 Dev server running!".to_string(),
        format!("   Local: http://localhost:{}", details.port),
    ];

    if !details.external_addresses.is_empty() {
        let external = details
            .external_addresses
            .iter()
            .map(|address| format!("http://{}:{}", address, details.port))
            .collect::<Vec<String>>()
            .join(", ");
        lines.push(format!("   External: {}", external));
    }

    if let Some((username, password)) = &config.basic_auth {
        lines.push(format!("   Basic auth: {} / {}", username, password));
    }

    lines.join("\n")
}

/// Build the URL to open in the browser
///
/// The segments are concatenated with no inserted separators: each optional
/// segment supplies its own leading delimiter (or deliberately none, for the
/// browser option literal).
pub fn browser_url(local_url: &str, config: &ServeConfig) -> String {
    let mut url = local_url.to_string();
    if config.lab {
        url.push_str(LAB_PATH);
    }
    if let Some(option) = &config.browser_option {
        url.push_str(option);
    }
    if let Some(platform) = &config.platform {
        url.push_str(PLATFORM_QUERY);
        url.push_str(platform);
    }
    url
}

/// Open the URL in the user's browser, without waiting on the process
///
/// Invoked at most once per serve session; failure to launch is logged and
/// does not affect the session.
pub fn open_browser(url: &str, browser: Option<&str>) {
    log::debug!("Opening browser at {}", url);
    let result = match browser {
        Some(app) => open::with_detached(url, app),
        None => open::that_detached(url),
    };
    if let Err(e) = result {
        log::warn!("Failed to open browser at {}: {}", url, e);
    }
}
