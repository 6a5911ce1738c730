//! External address discovery for dsmesh nodes.
//!
//! This crate provides the [`ExternalAddressResolver`], which finds a node's
//! public IPv4 or IPv6 address with a local route probe and an HTTP
//! "echo my IP" fallback.

#![doc(html_root_url = "https://docs.rs/dsmesh-client/0.1.0")]

mod config;
mod echo;
mod probe;
mod resolver;

pub use config::*;
pub use dsmesh_core::{FallbackCause, MeshError, Result};
pub use echo::{EchoClient, EchoClientBuilder};
pub use probe::{RouteProbe, UdpRouteProbe};
pub use resolver::{ExternalAddressResolver, Origin, Resolution};
