//! dsmesh - WireGuard mesh node bootstrap
//!
//! Bootstraps the configuration of a mesh node from the command line.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dsmesh_cli::run().await
}
