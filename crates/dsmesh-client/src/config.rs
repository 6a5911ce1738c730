//! Resolver configuration types.

use dsmesh_core::AddressFamily;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use url::Url;

/// Echo endpoint answering with the caller's IPv4 address
pub const DEFAULT_ECHO_URL_V4: &str = "https://ipv4.icanhazip.com/";

/// Echo endpoint answering with the caller's IPv6 address
pub const DEFAULT_ECHO_URL_V6: &str = "https://ipv6.icanhazip.com/";

/// Google public DNS; it only has to be routable, not online
pub const DEFAULT_PROBE_V4: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

/// Google public DNS over IPv6
pub const DEFAULT_PROBE_V6: SocketAddr = SocketAddr::new(
    IpAddr::V6(Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888)),
    53,
);

/// Deadline for the echo fallback request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where one address family is probed and echoed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyEndpoints {
    /// Public endpoint the route probe "dials"
    pub probe_target: SocketAddr,

    /// "Echo my IP" URL used when the probe gives no public address
    pub echo_url: Url,
}

/// Configuration for external address resolution
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// IPv4 endpoints
    pub v4: FamilyEndpoints,

    /// IPv6 endpoints
    pub v6: FamilyEndpoints,

    /// Timeout for the echo request
    pub timeout: Duration,

    /// User-Agent sent to the echo endpoints
    pub user_agent: String,

    /// Honor `HTTP(S)_PROXY` from the environment
    pub system_proxy: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            v4: FamilyEndpoints {
                probe_target: DEFAULT_PROBE_V4,
                echo_url: Url::parse(DEFAULT_ECHO_URL_V4).expect("valid default url"),
            },
            v6: FamilyEndpoints {
                probe_target: DEFAULT_PROBE_V6,
                echo_url: Url::parse(DEFAULT_ECHO_URL_V6).expect("valid default url"),
            },
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("dsmesh/{}", env!("CARGO_PKG_VERSION")),
            system_proxy: true,
        }
    }
}

impl ResolverConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoints for one family
    #[must_use]
    pub const fn endpoints(&self, family: AddressFamily) -> &FamilyEndpoints {
        match family {
            AddressFamily::V4 => &self.v4,
            AddressFamily::V6 => &self.v6,
        }
    }

    /// Set the echo URL for a family
    #[must_use]
    pub fn echo_url(mut self, family: AddressFamily, url: Url) -> Self {
        self.endpoints_mut(family).echo_url = url;
        self
    }

    /// Set the probe target for a family
    #[must_use]
    pub fn probe_target(mut self, family: AddressFamily, target: SocketAddr) -> Self {
        self.endpoints_mut(family).probe_target = target;
        self
    }

    /// Set the echo request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Enable or disable proxies taken from the environment
    #[must_use]
    pub const fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }

    fn endpoints_mut(&mut self, family: AddressFamily) -> &mut FamilyEndpoints {
        match family {
            AddressFamily::V4 => &mut self.v4,
            AddressFamily::V6 => &mut self.v6,
        }
    }
}
