//! Configuration storage.

use dsmesh_core::{MeshError, NodeConfig, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the node configuration
pub const DEFAULT_CONFIG_FILE: &str = "/etc/dsnetconfig.json";

/// Whether configuration storage already exists
#[derive(Debug)]
pub enum StorageStatus {
    /// Definitely absent
    Missing,
    /// Already present
    Present,
    /// Could not be determined
    Unknown(io::Error),
}

/// Where a node configuration is persisted
pub trait ConfigStore {
    /// Human-readable location, used in messages
    fn location(&self) -> &Path;

    /// Check whether the storage exists
    fn status(&self) -> StorageStatus;

    /// Persist `config`. Must never overwrite existing storage.
    fn save(&self, config: &NodeConfig) -> Result<()>;
}

/// Stores the configuration as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl JsonFileStore {
    /// Create a store for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load a configuration previously written by [`ConfigStore::save`]
    pub fn load(&self) -> Result<NodeConfig> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ConfigStore for JsonFileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn status(&self) -> StorageStatus {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => StorageStatus::Present,
            Err(e) if e.kind() == io::ErrorKind::NotFound => StorageStatus::Missing,
            Err(e) => StorageStatus::Unknown(e),
        }
    }

    fn save(&self, config: &NodeConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut content = serde_json::to_string_pretty(config)?;
        content.push('\n');

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            // Holds the private key.
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                MeshError::ConfigExists {
                    path: self.path.clone(),
                }
            } else {
                MeshError::Io(e)
            }
        })?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
