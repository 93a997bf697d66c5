//! Serve session data models

/// Report from a server backend of what ended up bound
///
/// Created by the backend adapter once its dev server accepts connections,
/// read-only afterward, and handed back to the invoking caller so further
/// tooling can be chained on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeDetails {
    /// Port the dev server is listening on
    pub port: u16,
    /// Externally reachable hosts/IPs, in adapter-provided order, no scheme
    pub external_addresses: Vec<String>,
}
