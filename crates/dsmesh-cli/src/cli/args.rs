//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use dsmesh::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Bootstrap the configuration of a WireGuard mesh node
///
/// `dsmesh init` picks random private IPv4 and IPv6 networks, works out
/// this host's public addresses and writes a fresh configuration.
#[derive(Parser, Debug)]
#[command(name = "dsmesh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the node configuration file
    #[arg(short, long, env = "DSMESH_CONFIG", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new node configuration; refuses to overwrite an existing one
    Init,

    /// Show the public IPv4 and IPv6 addresses of this host
    External,
}
