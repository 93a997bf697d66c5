//! Network interface helpers

use std::net::IpAddr;

/// Local IP addresses suitable for mDNS registration
///
/// Skips loopback interfaces; both IPv4 and IPv6 are included. Falls back to
/// localhost when interface enumeration fails so registration can still be
/// attempted.
pub fn local_addresses() -> Vec<IpAddr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .into_iter()
            .filter_map(|iface| {
                if iface.is_loopback() {
                    return None;
                }
                let ip = iface.addr.ip();
                log::debug!("Network interface {}: {}", iface.name, ip);
                Some(ip)
            })
            .collect(),
        Err(e) => {
            log::warn!("Failed to get network interfaces: {}", e);
            vec![IpAddr::V4(std::net::Ipv4Addr::LOCALHOST)]
        }
    }
}

/// Externally reachable IPv4 addresses of this machine, as strings
///
/// These are what companion devices on the LAN can use to reach the dev
/// server when it is bound to all interfaces.
pub fn external_ipv4_addresses() -> Vec<String> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .into_iter()
            .filter(|iface| !iface.is_loopback())
            .filter_map(|iface| match iface.addr.ip() {
                IpAddr::V4(ip) => Some(ip.to_string()),
                IpAddr::V6(_) => None,
            })
            .collect(),
        Err(e) => {
            log::warn!("Failed to get network interfaces: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_addresses_have_no_scheme_or_port() {
        for address in external_ipv4_addresses() {
            assert!(!address.contains("://"));
            assert!(!address.contains(':'));
            assert!(address.parse::<std::net::Ipv4Addr>().is_ok());
        }
    }
}
