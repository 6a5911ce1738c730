//! Per-family external address resolution.
//!
//! Each resolver first asks the OS which local address routes to a public
//! endpoint. If that address is already public it is the answer and no
//! HTTP request is made. Otherwise an "echo my IP" endpoint is asked.
//!
//! Resolvers never abort: a failed fallback yields a degraded
//! [`Resolution`] carrying the cause, and the caller decides what that
//! means for the run.

use dsmesh_core::{AddressFamily, FallbackCause};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{FamilyEndpoints, ResolverConfig};
use crate::echo::EchoClient;
use crate::probe::RouteProbe;

/// Where a resolved address came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Local source address of the probed route
    Probe,
    /// Body of the echo endpoint
    Echo,
    /// Nothing usable was found
    None,
}

/// Outcome of resolving one address family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Family that was resolved
    pub family: AddressFamily,

    /// The public address, always of `family`
    pub address: Option<IpAddr>,

    /// Where `address` came from
    pub origin: Origin,

    /// Why the fallback failed, when it did
    pub cause: Option<FallbackCause>,
}

impl Resolution {
    const fn found(family: AddressFamily, address: IpAddr, origin: Origin) -> Self {
        Self {
            family,
            address: Some(address),
            origin,
            cause: None,
        }
    }

    const fn degraded(family: AddressFamily, cause: FallbackCause) -> Self {
        Self {
            family,
            address: None,
            origin: Origin::None,
            cause: Some(cause),
        }
    }

    /// Returns true if the fallback failed and no address was found
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.cause.is_some()
    }

    /// The address as IPv4, if this is an IPv4 result
    #[must_use]
    pub const fn v4(&self) -> Option<Ipv4Addr> {
        match self.address {
            Some(IpAddr::V4(ip)) => Some(ip),
            _ => None,
        }
    }

    /// The address as IPv6, if this is an IPv6 result
    #[must_use]
    pub const fn v6(&self) -> Option<Ipv6Addr> {
        match self.address {
            Some(IpAddr::V6(ip)) => Some(ip),
            _ => None,
        }
    }
}

/// Resolves the node's public address for one family
#[derive(Clone)]
pub struct ExternalAddressResolver {
    family: AddressFamily,
    endpoints: FamilyEndpoints,
    echo: EchoClient,
    probe: Arc<dyn RouteProbe>,
}

impl ExternalAddressResolver {
    /// Create a resolver for `family` using the endpoints in `config`
    #[must_use]
    pub fn new(
        family: AddressFamily,
        config: &ResolverConfig,
        echo: EchoClient,
        probe: Arc<dyn RouteProbe>,
    ) -> Self {
        Self {
            family,
            endpoints: config.endpoints(family).clone(),
            echo,
            probe,
        }
    }

    /// Create an IPv4 resolver
    #[must_use]
    pub fn v4(config: &ResolverConfig, echo: EchoClient, probe: Arc<dyn RouteProbe>) -> Self {
        Self::new(AddressFamily::V4, config, echo, probe)
    }

    /// Create an IPv6 resolver
    #[must_use]
    pub fn v6(config: &ResolverConfig, echo: EchoClient, probe: Arc<dyn RouteProbe>) -> Self {
        Self::new(AddressFamily::V6, config, echo, probe)
    }

    /// Resolve the public address
    pub async fn resolve(&self) -> Resolution {
        let family = self.family;
        let target = self.endpoints.probe_target;

        match self.probe.local_addr(target).await {
            Ok(local) if is_public(family, local) => {
                info!(%family, addr = %local, "public address from route probe");
                return Resolution::found(family, local, Origin::Probe);
            }
            Ok(local) => {
                debug!(%family, addr = %local, "route probe gave a private address");
            }
            Err(e) => {
                debug!(%family, target = %target, error = %e, "route probe failed");
            }
        }

        let url = &self.endpoints.echo_url;
        let body = match self.echo.fetch(url).await {
            Ok(body) => body,
            Err(cause) => {
                warn!(%family, url = %url, %cause, "echo fallback failed");
                return Resolution::degraded(family, cause);
            }
        };

        match parse_address(family, &body) {
            Some(ip) => {
                info!(%family, addr = %ip, "public address from echo endpoint");
                Resolution::found(family, ip, Origin::Echo)
            }
            None => {
                warn!(%family, url = %url, "echo endpoint returned no usable address");
                Resolution::degraded(family, FallbackCause::InvalidBody(body))
            }
        }
    }
}

/// Returns true if `ip` is usable as-is as the public address for `family`.
///
/// IPv4: outside 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16.
/// IPv6: outside fc00::/7.
fn is_public(family: AddressFamily, ip: IpAddr) -> bool {
    match (family, ip) {
        (AddressFamily::V4, IpAddr::V4(v4)) => !v4.is_private(),
        (AddressFamily::V6, IpAddr::V6(v6)) => !matches!(v6.octets()[0], 0xfc | 0xfd),
        _ => false,
    }
}

fn parse_address(family: AddressFamily, body: &str) -> Option<IpAddr> {
    let body = body.trim();
    match family {
        AddressFamily::V4 => body.parse::<Ipv4Addr>().ok().map(IpAddr::V4),
        AddressFamily::V6 => body.parse::<Ipv6Addr>().ok().map(IpAddr::V6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc1918_is_not_public() {
        let private = ["10.1.2.3", "172.16.0.1", "172.31.255.255", "192.168.1.5"];
        for ip in private {
            assert!(!is_public(AddressFamily::V4, ip.parse().unwrap()), "{ip}");
        }
        let public = ["74.125.20.10", "172.32.0.1", "172.15.255.255", "192.169.0.1"];
        for ip in public {
            assert!(is_public(AddressFamily::V4, ip.parse().unwrap()), "{ip}");
        }
    }

    #[test]
    fn ula_is_not_public() {
        assert!(!is_public(AddressFamily::V6, "fd12:3456::1".parse().unwrap()));
        assert!(!is_public(AddressFamily::V6, "fc00::1".parse().unwrap()));
        assert!(is_public(AddressFamily::V6, "2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn family_mismatch_is_not_public() {
        assert!(!is_public(AddressFamily::V4, "2001:db8::1".parse().unwrap()));
        assert!(!is_public(AddressFamily::V6, "74.125.20.10".parse().unwrap()));
    }

    #[test]
    fn parses_only_requested_family() {
        assert_eq!(
            parse_address(AddressFamily::V4, " 203.0.113.7\n"),
            Some("203.0.113.7".parse().unwrap())
        );
        assert_eq!(parse_address(AddressFamily::V4, "2001:db8::1"), None);
        assert_eq!(
            parse_address(AddressFamily::V6, "2001:db8::1\n"),
            Some("2001:db8::1".parse().unwrap())
        );
        assert_eq!(parse_address(AddressFamily::V6, "<html>"), None);
    }
}
