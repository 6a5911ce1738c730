//! Tunnel address allocation inside the mesh blocks.
//!
//! Addresses are handed out in order: the first host after the network
//! address that nobody holds yet. The IPv4 broadcast address is never used.

use std::collections::HashSet;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{MeshError, Result};
use crate::types::{PrivateNetworkBlock, UlaNetworkBlock};

/// Allocate the lowest free IPv4 host address in `block`
pub fn allocate_v4(
    block: &PrivateNetworkBlock,
    taken: impl IntoIterator<Item = Ipv4Addr>,
) -> Result<Ipv4Addr> {
    let taken: HashSet<u32> = taken.into_iter().map(u32::from).collect();
    let base = u32::from(block.network());
    let broadcast = u32::from(block.broadcast());

    ((base + 1)..broadcast)
        .find(|candidate| !taken.contains(candidate))
        .map(Ipv4Addr::from)
        .ok_or_else(|| MeshError::AddressExhausted(block.to_string()))
}

/// Allocate the lowest free IPv6 host address in `block`.
///
/// A /64 has 2^64 hosts, so only exhaustion of `taken` itself can end the scan.
pub fn allocate_v6(
    block: &UlaNetworkBlock,
    taken: impl IntoIterator<Item = Ipv6Addr>,
) -> Result<Ipv6Addr> {
    let taken: HashSet<u128> = taken.into_iter().map(u128::from).collect();
    let base = u128::from(block.network());
    let last = base | u128::from(u64::MAX);

    ((base + 1)..=last)
        .find(|candidate| !taken.contains(candidate))
        .map(Ipv6Addr::from)
        .ok_or_else(|| MeshError::AddressExhausted(block.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4_block() -> PrivateNetworkBlock {
        "10.20.32.0/22".parse().unwrap()
    }

    #[test]
    fn first_v4_host() {
        let ip = allocate_v4(&v4_block(), []).unwrap();
        assert_eq!(ip, Ipv4Addr::new(10, 20, 32, 1));
    }

    #[test]
    fn skips_taken_v4() {
        let taken = [Ipv4Addr::new(10, 20, 32, 1), Ipv4Addr::new(10, 20, 32, 2)];
        let ip = allocate_v4(&v4_block(), taken).unwrap();
        assert_eq!(ip, Ipv4Addr::new(10, 20, 32, 3));
    }

    #[test]
    fn crosses_octet_boundary() {
        let taken = (1..=255).map(|d| Ipv4Addr::new(10, 20, 32, d));
        let ip = allocate_v4(&v4_block(), taken).unwrap();
        assert_eq!(ip, Ipv4Addr::new(10, 20, 33, 0));
    }

    #[test]
    fn exhausted_v4() {
        let block = v4_block();
        let base = u32::from(block.network());
        let taken = ((base + 1)..u32::from(block.broadcast())).map(Ipv4Addr::from);
        let err = allocate_v4(&block, taken).unwrap_err();
        assert!(matches!(err, MeshError::AddressExhausted(_)));
    }

    #[test]
    fn first_v6_host() {
        let block: UlaNetworkBlock = "fd00:1:2:300::/64".parse().unwrap();
        let ip = allocate_v6(&block, []).unwrap();
        assert_eq!(ip, "fd00:1:2:300::1".parse::<Ipv6Addr>().unwrap());
        assert!(block.contains(ip));

        let next = allocate_v6(&block, [ip]).unwrap();
        assert_eq!(next, "fd00:1:2:300::2".parse::<Ipv6Addr>().unwrap());
    }
}
