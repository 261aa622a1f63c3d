//! Reduced cluster map: the per-cluster configuration consumed by the
//! session launcher.
//!
//! The map is keyed by cluster name and preserves the insertion order of
//! the source inventory, so reruns of the reducer serialize identically.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{KubedError, Result};

/// Per-cluster configuration entry.
///
/// Field names are renamed to the exact uppercase keys used in the map
/// file and exported into the session environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub domain: String,
    #[serde(rename = "CNC_DOMAIN")]
    pub cnc_domain: String,
    #[serde(rename = "CNC")]
    pub cnc: String,
    #[serde(rename = "VAULT_ADDR")]
    pub vault_addr: String,
    #[serde(rename = "VAULT_NAMESPACE")]
    pub vault_namespace: String,
    #[serde(rename = "SIGN_ON")]
    pub sign_on: String,
}

impl ClusterConfig {
    /// Build the config for a named cluster: domain verbatim, the four
    /// shared constants, and the derived sign-on command.
    pub fn for_cluster(name: &str, domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            cnc_domain: constants::CNC_DOMAIN.to_string(),
            cnc: constants::CNC.to_string(),
            vault_addr: constants::VAULT_ADDR.to_string(),
            vault_namespace: constants::VAULT_NAMESPACE.to_string(),
            sign_on: constants::sign_on_command(name),
        }
    }
}

/// Insertion-ordered mapping from cluster name to [`ClusterConfig`].
///
/// Duplicate names overwrite the value in place; the key keeps its
/// first-seen position.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClusterMap(Mapping);

impl ClusterMap {
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a cluster entry, overwriting any existing entry of the
    /// same name.
    pub fn insert(&mut self, name: &str, config: &ClusterConfig) -> Result<()> {
        let value = serde_yaml::to_value(config)?;
        self.0.insert(Value::String(name.to_string()), value);
        Ok(())
    }

    /// Cluster names in map order.
    pub fn names(&self) -> Vec<String> {
        self.0
            .keys()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect()
    }

    /// Resolve a cluster by name.
    ///
    /// # Errors
    ///
    /// Returns `ClusterNotFound` listing the available names when the
    /// cluster is absent.
    pub fn get(&self, name: &str) -> Result<ClusterConfig> {
        let entry = self
            .0
            .iter()
            .find(|(key, _)| key.as_str() == Some(name))
            .map(|(_, value)| value);
        match entry {
            Some(value) => Ok(serde_yaml::from_value(value.clone())?),
            None => Err(KubedError::ClusterNotFound {
                name: name.to_string(),
                available: self.names().join(", "),
            }),
        }
    }

    /// Serialize the map as YAML, keys in insertion order.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.0)?)
    }

    /// Parse a map from YAML text.
    pub fn load_from_str(contents: &str) -> Result<Self> {
        Ok(Self(serde_yaml::from_str(contents)?))
    }

    /// Load a map from a file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading cluster map");
        let contents = std::fs::read_to_string(path)?;
        let mapping: Mapping =
            serde_yaml::from_str(&contents).map_err(|source| KubedError::MapParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self(mapping))
    }
}

/// Locate the cluster map file for the launcher.
///
/// Candidates, in order: the `CLUSTERS_FILE` env var, the directory of
/// the running executable, the current working directory. The first
/// existing candidate wins.
pub fn discover_map_file() -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Ok(overridden) = std::env::var(constants::MAP_FILE_ENV) {
        candidates.push(PathBuf::from(overridden));
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(constants::MAP_FILE));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(constants::MAP_FILE));
    }

    match candidates.iter().find(|p| p.exists()) {
        Some(found) => {
            debug!(path = %found.display(), "cluster map located");
            Ok(found.clone())
        }
        None => Err(KubedError::MapNotFound {
            searched: candidates
                .iter()
                .map(|p| format!("  {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n"),
        }),
    }
}
