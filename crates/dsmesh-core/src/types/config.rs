//! The node configuration aggregate written by `dsmesh init`.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

use super::{ExternalAddress, PrivateNetworkBlock, UlaNetworkBlock};
use crate::keys::PrivateKey;

/// Default WireGuard listen port
pub const DEFAULT_LISTEN_PORT: u16 = 51820;

/// Default tunnel interface name
pub const DEFAULT_INTERFACE_NAME: &str = "dsnet";

/// Default search domain for peer hostnames
pub const DEFAULT_DOMAIN: &str = "dsnet";

/// Default location of the peer report
pub const DEFAULT_REPORT_FILE: &str = "/var/lib/dsnetreport.json";

/// Fixed values every freshly initialized node starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefaults {
    /// UDP port the tunnel listens on
    pub listen_port: u16,

    /// Name of the tunnel interface
    pub interface_name: String,

    /// Domain appended to peer hostnames
    pub domain: String,

    /// Where the peer report is written
    pub report_file: PathBuf,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            interface_name: DEFAULT_INTERFACE_NAME.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}

/// A peer entry. Freshly initialized nodes have none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    /// Peer hostname, unique within the domain
    pub hostname: String,

    /// Peer's base64 public key
    pub public_key: String,

    /// Tunnel IPv4 address assigned to the peer
    #[serde(default)]
    pub ip: Option<Ipv4Addr>,

    /// Tunnel IPv6 address assigned to the peer
    #[serde(default)]
    pub ip6: Option<Ipv6Addr>,
}

/// Complete configuration of a mesh node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Tunnel private key
    pub private_key: PrivateKey,

    /// UDP port the tunnel listens on
    pub listen_port: u16,

    /// Private IPv4 block shared by the mesh
    pub network: PrivateNetworkBlock,

    /// IPv6 ULA block shared by the mesh
    pub network6: UlaNetworkBlock,

    /// This node's tunnel IPv4 address, inside `network`
    pub ip: Ipv4Addr,

    /// This node's tunnel IPv6 address, inside `network6`
    pub ip6: Ipv6Addr,

    /// Publicly reachable IPv4 address
    #[serde(default)]
    pub external_ip: Option<Ipv4Addr>,

    /// Publicly reachable IPv6 address
    #[serde(default)]
    pub external_ip6: Option<Ipv6Addr>,

    /// Name of the tunnel interface
    pub interface_name: String,

    /// Domain appended to peer hostnames
    pub domain: String,

    /// Where the peer report is written
    pub report_file: PathBuf,

    /// DNS server pushed to peers; not set by default
    #[serde(default)]
    pub dns: Option<IpAddr>,

    /// Known peers
    #[serde(default)]
    pub peers: Vec<PeerConfig>,

    /// Additional networks routed through this node, in CIDR form
    #[serde(default)]
    pub networks: Vec<String>,
}

impl NodeConfig {
    /// The external addresses as a single value
    #[must_use]
    pub const fn external(&self) -> ExternalAddress {
        ExternalAddress::new(self.external_ip, self.external_ip6)
    }

    /// Every IPv4 tunnel address already in use
    pub fn allocated_v4(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        std::iter::once(self.ip).chain(self.peers.iter().filter_map(|p| p.ip))
    }

    /// Every IPv6 tunnel address already in use
    pub fn allocated_v6(&self) -> impl Iterator<Item = Ipv6Addr> + '_ {
        std::iter::once(self.ip6).chain(self.peers.iter().filter_map(|p| p.ip6))
    }
}
