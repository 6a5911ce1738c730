use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{MeshError, Result};

/// Prefix length of every private IPv4 block
pub const PRIVATE_PREFIX_LEN: u8 = 22;

/// Prefix length of every ULA block
pub const ULA_PREFIX_LEN: u8 = 64;

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// A private IPv4 /22 inside 10.0.0.0/8.
///
/// The network address always has the form `10.x.y.0` with `y` a multiple
/// of four, so the block spans `10.x.y.0` through `10.x.(y+3).255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrivateNetworkBlock {
    network: Ipv4Addr,
}

impl PrivateNetworkBlock {
    /// Create a block from its network address, checking the /22 form
    pub fn new(network: Ipv4Addr) -> Result<Self> {
        let [a, _, c, d] = network.octets();
        if a != 10 || c % 4 != 0 || d != 0 {
            return Err(MeshError::InvalidAddress(format!(
                "{network} is not a 10.x.y.0/{PRIVATE_PREFIX_LEN} network address"
            )));
        }
        Ok(Self { network })
    }

    /// Build `10.b0.(b1 & 0xfc).0` from two random bytes
    #[must_use]
    pub(crate) const fn from_random_bytes([b0, b1]: [u8; 2]) -> Self {
        Self {
            network: Ipv4Addr::new(10, b0, b1 & 0xfc, 0),
        }
    }

    /// Network address
    #[must_use]
    pub const fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// Netmask, always 255.255.252.0
    #[must_use]
    pub const fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::new(255, 255, 252, 0)
    }

    /// Last address of the block
    #[must_use]
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) | !u32::from(self.mask()))
    }

    /// Returns true if `ip` lies inside this block
    #[must_use]
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & u32::from(self.mask()) == u32::from(self.network)
    }
}

impl fmt::Display for PrivateNetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, PRIVATE_PREFIX_LEN)
    }
}

impl FromStr for PrivateNetworkBlock {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        let addr = parse_cidr(s, PRIVATE_PREFIX_LEN)?;
        let network = addr
            .parse::<Ipv4Addr>()
            .map_err(|_| MeshError::InvalidAddress(s.to_string()))?;
        Self::new(network)
    }
}

impl TryFrom<String> for PrivateNetworkBlock {
    type Error = MeshError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PrivateNetworkBlock> for String {
    fn from(block: PrivateNetworkBlock) -> Self {
        block.to_string()
    }
}

/// An IPv6 unique local /64 inside fd00::/8.
///
/// Layout: `fd 00 g0 g1 g2 g3 g4` followed by nine zero bytes, where
/// `g0..g4` is the 40-bit random global ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UlaNetworkBlock {
    network: Ipv6Addr,
}

impl UlaNetworkBlock {
    /// Create a block from its network address, checking the ULA layout
    pub fn new(network: Ipv6Addr) -> Result<Self> {
        let octets = network.octets();
        if octets[0] != 0xfd || octets[1] != 0x00 || octets[7..].iter().any(|b| *b != 0) {
            return Err(MeshError::InvalidAddress(format!(
                "{network} is not an fd00::/{ULA_PREFIX_LEN} ULA network address"
            )));
        }
        Ok(Self { network })
    }

    /// Build the block from a 40-bit global ID
    #[must_use]
    pub fn from_global_id(id: [u8; 5]) -> Self {
        let mut octets = [0u8; 16];
        octets[0] = 0xfd;
        octets[2..7].copy_from_slice(&id);
        Self {
            network: Ipv6Addr::from(octets),
        }
    }

    /// Network address
    #[must_use]
    pub const fn network(&self) -> Ipv6Addr {
        self.network
    }

    /// Netmask: eight 0xff bytes then eight zero bytes
    #[must_use]
    pub const fn mask(&self) -> [u8; 16] {
        [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0, 0, 0, 0, 0]
    }

    /// Returns true if `ip` lies inside this block
    #[must_use]
    pub fn contains(&self, ip: Ipv6Addr) -> bool {
        ip.octets()[..8] == self.network.octets()[..8]
    }
}

impl fmt::Display for UlaNetworkBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, ULA_PREFIX_LEN)
    }
}

impl FromStr for UlaNetworkBlock {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self> {
        let addr = parse_cidr(s, ULA_PREFIX_LEN)?;
        let network = addr
            .parse::<Ipv6Addr>()
            .map_err(|_| MeshError::InvalidAddress(s.to_string()))?;
        Self::new(network)
    }
}

impl TryFrom<String> for UlaNetworkBlock {
    type Error = MeshError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<UlaNetworkBlock> for String {
    fn from(block: UlaNetworkBlock) -> Self {
        block.to_string()
    }
}

/// Split `addr/len`, requiring the expected prefix length
fn parse_cidr(s: &str, expected: u8) -> Result<&str> {
    let (addr, len) = s
        .split_once('/')
        .ok_or_else(|| MeshError::InvalidAddress(format!("{s} is missing a prefix length")))?;

    match len.parse::<u8>() {
        Ok(len) if len == expected => Ok(addr),
        _ => Err(MeshError::InvalidAddress(format!(
            "{s} must have prefix length /{expected}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_block_rejects_bad_forms() {
        assert!(PrivateNetworkBlock::new(Ipv4Addr::new(10, 1, 8, 0)).is_ok());
        assert!(PrivateNetworkBlock::new(Ipv4Addr::new(11, 1, 8, 0)).is_err());
        assert!(PrivateNetworkBlock::new(Ipv4Addr::new(10, 1, 9, 0)).is_err());
        assert!(PrivateNetworkBlock::new(Ipv4Addr::new(10, 1, 8, 1)).is_err());
    }

    #[test]
    fn private_block_bounds() {
        let block = PrivateNetworkBlock::new(Ipv4Addr::new(10, 42, 4, 0)).unwrap();
        assert_eq!(block.broadcast(), Ipv4Addr::new(10, 42, 7, 255));
        assert!(block.contains(Ipv4Addr::new(10, 42, 6, 17)));
        assert!(!block.contains(Ipv4Addr::new(10, 42, 8, 0)));
        assert_eq!(block.to_string(), "10.42.4.0/22");
    }

    #[test]
    fn private_block_parse() {
        let block: PrivateNetworkBlock = "10.200.252.0/22".parse().unwrap();
        assert_eq!(block.network(), Ipv4Addr::new(10, 200, 252, 0));
        assert!("10.200.252.0/24".parse::<PrivateNetworkBlock>().is_err());
        assert!("10.200.252.0".parse::<PrivateNetworkBlock>().is_err());
    }

    #[test]
    fn ula_block_layout() {
        let block = UlaNetworkBlock::from_global_id([0x12, 0x34, 0x56, 0x78, 0x9a]);
        assert_eq!(block.to_string(), "fd00:1234:5678:9a00::/64");
        assert!(block.contains("fd00:1234:5678:9a00::1".parse().unwrap()));
        assert!(!block.contains("fd00:1234:5678:9a01::1".parse().unwrap()));
    }

    #[test]
    fn ula_block_rejects_bad_forms() {
        assert!(UlaNetworkBlock::new("fc00:1234:5678:9a00::".parse().unwrap()).is_err());
        assert!(UlaNetworkBlock::new("fd01:1234:5678:9a00::".parse().unwrap()).is_err());
        assert!(UlaNetworkBlock::new("fd00:1234:5678:9a01::".parse().unwrap()).is_err());
        assert!("fd00:1234:5678:9a00::/48".parse::<UlaNetworkBlock>().is_err());
    }

    #[test]
    fn blocks_serialize_as_cidr() {
        let block = PrivateNetworkBlock::new(Ipv4Addr::new(10, 0, 4, 0)).unwrap();
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, "\"10.0.4.0/22\"");
        let back: PrivateNetworkBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);

        let bad = serde_json::from_str::<PrivateNetworkBlock>("\"192.168.0.0/22\"");
        assert!(bad.is_err());
    }

    #[test]
    fn family_display() {
        assert_eq!(AddressFamily::V4.to_string(), "IPv4");
        assert_eq!(AddressFamily::V6.to_string(), "IPv6");
    }
}
