//! Node initialization.
//!
//! [`Initializer::run`] performs the whole bootstrap in order:
//!
//! 1. refuse to continue unless the config storage is definitely missing
//! 2. generate a key and pick random IPv4 and ULA blocks
//! 3. resolve the external IPv4 and IPv6 addresses
//! 4. allocate the node's own tunnel addresses inside the new blocks
//! 5. require at least one external address
//! 6. persist the configuration
//!
//! Any error ends the run before step 6, so nothing is written.

use dsmesh_client::{
    EchoClient, ExternalAddressResolver, Resolution, ResolverConfig, RouteProbe, UdpRouteProbe,
};
use dsmesh_core::allocate::{allocate_v4, allocate_v6};
use dsmesh_core::keys::PrivateKey;
use dsmesh_core::{select, AddressFamily, MeshError, NodeConfig, NodeDefaults, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::store::{ConfigStore, StorageStatus};

/// What to do when an address family's echo fallback fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Abort initialization
    Strict,
    /// Continue without an address for this family
    #[default]
    Lenient,
}

/// Everything the initializer needs besides its collaborators
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Fixed values for the new configuration
    pub defaults: NodeDefaults,

    /// Probe targets, echo endpoints and timeout
    pub resolver: ResolverConfig,

    /// Policy for IPv4 fallback failures
    pub v4_policy: FallbackPolicy,

    /// Policy for IPv6 fallback failures
    pub v6_policy: FallbackPolicy,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            defaults: NodeDefaults::default(),
            resolver: ResolverConfig::default(),
            v4_policy: FallbackPolicy::Strict,
            v6_policy: FallbackPolicy::Lenient,
        }
    }
}

impl InitOptions {
    /// Policy for `family`
    #[must_use]
    pub const fn policy(&self, family: AddressFamily) -> FallbackPolicy {
        match family {
            AddressFamily::V4 => self.v4_policy,
            AddressFamily::V6 => self.v6_policy,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct InitOutcome {
    /// The configuration that was persisted
    pub config: NodeConfig,

    /// Where it was persisted
    pub location: PathBuf,
}

impl InitOutcome {
    /// The message shown to the operator on success
    #[must_use]
    pub fn notice(&self) -> String {
        format!(
            "Config written to {}. Please check/edit.",
            self.location.display()
        )
    }
}

/// Builds and persists a fresh node configuration
pub struct Initializer<S> {
    store: S,
    options: InitOptions,
    v4: ExternalAddressResolver,
    v6: ExternalAddressResolver,
    rng: StdRng,
}

impl<S: ConfigStore> Initializer<S> {
    /// Create an initializer that probes real routes
    pub fn new(store: S, options: InitOptions) -> Result<Self> {
        Self::with_probe(store, options, Arc::new(UdpRouteProbe))
    }

    /// Create an initializer with a custom route probe
    pub fn with_probe(store: S, options: InitOptions, probe: Arc<dyn RouteProbe>) -> Result<Self> {
        let echo = EchoClient::from_config(&options.resolver)?;
        let v4 = ExternalAddressResolver::v4(&options.resolver, echo.clone(), probe.clone());
        let v6 = ExternalAddressResolver::v6(&options.resolver, echo, probe);

        Ok(Self {
            store,
            options,
            v4,
            v6,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the random source used for block selection
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run the initialization
    pub async fn run(&mut self) -> Result<InitOutcome> {
        let location = self.store.location().to_path_buf();
        match self.store.status() {
            StorageStatus::Missing => {}
            StorageStatus::Present => return Err(MeshError::ConfigExists { path: location }),
            StorageStatus::Unknown(source) => {
                return Err(MeshError::ConfigUnknown {
                    path: location,
                    source,
                })
            }
        }

        let private_key = PrivateKey::generate();
        let network = select::private_network(&mut self.rng);
        let network6 = select::ula_network(&mut self.rng);
        info!(%network, %network6, "selected private networks");

        let v4 = self.v4.resolve().await;
        self.check(&v4)?;
        let v6 = self.v6.resolve().await;
        self.check(&v6)?;

        let defaults = &self.options.defaults;
        let mut config = NodeConfig {
            private_key,
            listen_port: defaults.listen_port,
            network,
            network6,
            // Network addresses are never handed out, so they hold the place.
            ip: network.network(),
            ip6: network6.network(),
            external_ip: v4.v4(),
            external_ip6: v6.v6(),
            interface_name: defaults.interface_name.clone(),
            domain: defaults.domain.clone(),
            report_file: defaults.report_file.clone(),
            dns: None,
            peers: Vec::new(),
            networks: Vec::new(),
        };

        config.ip = allocate_v4(&config.network, config.allocated_v4())?;
        config.ip6 = allocate_v6(&config.network6, config.allocated_v6())?;
        debug!(ip = %config.ip, ip6 = %config.ip6, "allocated tunnel addresses");

        if config.external().is_empty() {
            return Err(MeshError::NoExternalAddress);
        }

        self.store.save(&config)?;
        info!(path = %location.display(), external = %config.external(), "node initialized");

        Ok(InitOutcome { config, location })
    }

    /// Apply the per-family policy to a resolution
    fn check(&self, resolution: &Resolution) -> Result<()> {
        let Some(cause) = &resolution.cause else {
            return Ok(());
        };

        let family = resolution.family;
        match self.options.policy(family) {
            FallbackPolicy::Strict if cause.is_hard_failure() => Err(MeshError::Fallback {
                family,
                cause: cause.clone(),
            }),
            _ => {
                warn!(%family, %cause, "continuing without an external address");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policies_keep_v4_strict() {
        let options = InitOptions::default();
        assert_eq!(options.policy(AddressFamily::V4), FallbackPolicy::Strict);
        assert_eq!(options.policy(AddressFamily::V6), FallbackPolicy::Lenient);
    }

    #[test]
    fn notice_names_location() {
        let dir = std::env::temp_dir();
        let outcome = InitOutcome {
            config: sample_config(),
            location: dir.join("dsnetconfig.json"),
        };
        assert_eq!(
            outcome.notice(),
            format!(
                "Config written to {}. Please check/edit.",
                dir.join("dsnetconfig.json").display()
            )
        );
    }

    fn sample_config() -> NodeConfig {
        let defaults = NodeDefaults::default();
        NodeConfig {
            private_key: PrivateKey::from_bytes([3u8; 32]),
            listen_port: defaults.listen_port,
            network: "10.0.0.0/22".parse().unwrap(),
            network6: "fd00::/64".parse().unwrap(),
            ip: "10.0.0.1".parse().unwrap(),
            ip6: "fd00::1".parse().unwrap(),
            external_ip: None,
            external_ip6: Some("2001:db8::1".parse().unwrap()),
            interface_name: defaults.interface_name,
            domain: defaults.domain,
            report_file: defaults.report_file,
            dns: None,
            peers: Vec::new(),
            networks: Vec::new(),
        }
    }
}
