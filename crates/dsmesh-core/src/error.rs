use std::path::PathBuf;

use thiserror::Error;

use crate::types::AddressFamily;

/// Result type alias for dsmesh operations
pub type Result<T> = std::result::Result<T, MeshError>;

/// Why the "echo my IP" fallback did not produce an address
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FallbackCause {
    /// The request never completed (DNS, TLS, connect, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with something other than 200
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not an address of the requested family
    #[error("unparseable response body {0:?}")]
    InvalidBody(String),
}

impl FallbackCause {
    /// Returns true if the endpoint could not be reached or refused to answer.
    ///
    /// A body that arrived but did not parse is not a hard failure.
    #[must_use]
    pub const fn is_hard_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_))
    }
}

/// Errors that can occur while bootstrapping a node configuration
#[derive(Error, Debug)]
pub enum MeshError {
    /// Configuration storage is already present
    #[error("refusing to overwrite existing {}", path.display())]
    ConfigExists {
        /// Location of the existing configuration
        path: PathBuf,
    },

    /// Presence of the configuration storage could not be determined
    #[error("cannot determine whether {} exists: {source}", path.display())]
    ConfigUnknown {
        /// Location that was checked
        path: PathBuf,
        /// Underlying stat failure
        #[source]
        source: std::io::Error,
    },

    /// Neither an IPv4 nor an IPv6 external address could be determined
    #[error("could not determine any external IP, v4 or v6")]
    NoExternalAddress,

    /// External address fallback failed under a strict policy
    #[error("{family} external address lookup failed: {cause}")]
    Fallback {
        /// Address family being resolved
        family: AddressFamily,
        /// What went wrong
        cause: FallbackCause,
    },

    /// No free host address left in a network block
    #[error("IP range exhausted in {0}")]
    AddressExhausted(String),

    /// Invalid IP address or network
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MeshError {
    /// Returns true if the error was raised before any work began
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::ConfigExists { .. } | Self::ConfigUnknown { .. })
    }

    /// Returns true if the error was raised by the final external address check
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::NoExternalAddress)
    }
}
