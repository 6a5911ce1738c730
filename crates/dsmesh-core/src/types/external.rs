use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// The node's publicly reachable addresses, one optional entry per family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAddress {
    /// Public IPv4 address
    #[serde(default)]
    pub v4: Option<Ipv4Addr>,

    /// Public IPv6 address
    #[serde(default)]
    pub v6: Option<Ipv6Addr>,
}

impl ExternalAddress {
    /// Create from the two per-family results
    #[must_use]
    pub const fn new(v4: Option<Ipv4Addr>, v6: Option<Ipv6Addr>) -> Self {
        Self { v4, v6 }
    }

    /// Returns true if neither family has an address
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.v4.is_none() && self.v6.is_none()
    }
}

impl fmt::Display for ExternalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.v4, self.v6) {
            (Some(v4), Some(v6)) => write!(f, "{v4}, {v6}"),
            (Some(v4), None) => write!(f, "{v4}"),
            (None, Some(v6)) => write!(f, "{v6}"),
            (None, None) => write!(f, "(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_both_missing() {
        assert!(ExternalAddress::default().is_empty());
        assert!(!ExternalAddress::new(Some(Ipv4Addr::new(203, 0, 113, 7)), None).is_empty());
        assert!(!ExternalAddress::new(None, Some(Ipv6Addr::LOCALHOST)).is_empty());
    }

    #[test]
    fn display_lists_both_families() {
        let v6: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let both = ExternalAddress::new(Some(Ipv4Addr::new(203, 0, 113, 7)), Some(v6));
        assert_eq!(both.to_string(), "203.0.113.7, 2001:db8::1");
        assert_eq!(ExternalAddress::new(None, Some(v6)).to_string(), "2001:db8::1");
        assert_eq!(ExternalAddress::default().to_string(), "(none)");
    }
}
