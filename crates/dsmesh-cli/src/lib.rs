//! # dsmesh-cli
//!
//! Command-line front end for bootstrapping a WireGuard mesh node.
//!
//! ## Commands
//!
//! - **init**: pick random private networks, find the public addresses and
//!   write a fresh configuration (never overwrites)
//! - **external**: show the public IPv4/IPv6 addresses of this host

pub mod cli;
pub mod logging;
pub mod output;

pub use cli::run;
