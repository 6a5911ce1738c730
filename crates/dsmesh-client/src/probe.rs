//! Local route probing.
//!
//! Connecting a UDP socket sends nothing on the wire but makes the kernel
//! pick the source address it would use for that destination. Reading it
//! back tells us which local address faces the outside world.

use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Finds the local source address the OS would use to reach `target`
#[async_trait]
pub trait RouteProbe: Send + Sync {
    /// Return the local address selected for the route to `target`
    async fn local_addr(&self, target: SocketAddr) -> io::Result<IpAddr>;
}

/// Route probe backed by a connected UDP socket
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpRouteProbe;

#[async_trait]
impl RouteProbe for UdpRouteProbe {
    async fn local_addr(&self, target: SocketAddr) -> io::Result<IpAddr> {
        let bind: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let socket = UdpSocket::bind(bind).await?;
        socket.connect(target).await?;
        let local = socket.local_addr()?.ip();

        debug!(target = %target, local = %local, "route probe");
        Ok(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loopback_route_uses_loopback_source() {
        let target: SocketAddr = (Ipv4Addr::LOCALHOST, 9).into();
        let local = UdpRouteProbe.local_addr(target).await.unwrap();
        assert_eq!(local, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
