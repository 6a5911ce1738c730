//! Bootstrap the initial configuration of a WireGuard mesh node.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dsmesh::{InitOptions, Initializer, JsonFileStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> dsmesh::Result<()> {
//!     let store = JsonFileStore::new("/etc/dsnetconfig.json");
//!     let mut init = Initializer::new(store, InitOptions::default())?;
//!
//!     let outcome = init.run().await?;
//!     println!("{}", outcome.notice());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/dsmesh/0.1.0")]

pub mod init;
pub mod store;

// Re-export core types
pub use dsmesh_core::*;

// Re-export client
pub use dsmesh_client::{
    EchoClient, ExternalAddressResolver, Origin, Resolution, ResolverConfig, RouteProbe,
    UdpRouteProbe,
};

pub use init::{FallbackPolicy, InitOptions, InitOutcome, Initializer};
pub use store::{ConfigStore, JsonFileStore, StorageStatus, DEFAULT_CONFIG_FILE};

// Re-export runtime for convenience
pub use tokio;
