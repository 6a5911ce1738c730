//! Core types for dsmesh node bootstrapping.
//!
//! This crate provides the pieces of a node's initial configuration that do
//! not touch the network:
//!
//! - **Types**: network blocks, external addresses and the [`NodeConfig`] aggregate
//! - **Selection**: random private IPv4 /22 and IPv6 ULA /64 blocks
//! - **Allocation**: the node's own tunnel addresses inside those blocks
//! - **Keys**: X25519 private keys for the tunnel interface
//! - **Errors**: the [`MeshError`] taxonomy shared by every dsmesh crate
//!
//! # Example
//!
//! ```rust,ignore
//! use dsmesh_core::select;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::from_entropy();
//! let v4 = select::private_network(&mut rng);
//! let v6 = select::ula_network(&mut rng);
//! println!("{v4} {v6}");
//! ```

#![doc(html_root_url = "https://docs.rs/dsmesh-core/0.1.0")]

pub mod allocate;
mod error;
pub mod keys;
pub mod select;
pub mod types;

pub use error::{FallbackCause, MeshError, Result};
pub use types::*;
