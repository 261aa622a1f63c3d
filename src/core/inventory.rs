//! Raw cluster inventory parsing and reduction.
//!
//! The inventory is an externally produced YAML document with a single
//! top-level `clusters` list. Only `name` and `domain` are consumed from
//! each record; everything else is ignored.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::core::cluster::{ClusterConfig, ClusterMap};
use crate::error::{KubedError, Result};

/// Top-level shape of the raw inventory file.
#[derive(Debug, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub clusters: Vec<ClusterRecord>,
}

/// One record of the raw inventory.
///
/// `name` and `domain` stay optional at the serde layer; validation
/// happens per record so one bad record never aborts the batch.
#[derive(Debug, Deserialize)]
pub struct ClusterRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
}

impl ClusterRecord {
    /// Non-empty `name` and `domain`, or `None` if the record is unusable.
    fn fields(&self) -> Option<(&str, &str)> {
        match (self.name.as_deref(), self.domain.as_deref()) {
            (Some(name), Some(domain)) if !name.is_empty() && !domain.is_empty() => {
                Some((name, domain))
            }
            _ => None,
        }
    }
}

/// A record the reducer left out, with its position in the source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
}

/// Outcome of one reducer run.
#[derive(Debug, Default)]
pub struct ReduceSummary {
    /// Number of entries written to the destination map.
    pub written: usize,
    /// Records excluded for missing name/domain, in source order.
    pub skipped: Vec<SkippedRecord>,
}

/// Reduce a raw inventory file into the cluster map file.
///
/// The destination is written once, after the whole map is built, so a
/// failed run never leaves a partial file behind. Duplicate names
/// overwrite the earlier entry (the key keeps its first-seen position).
///
/// # Errors
///
/// Returns `InventoryRead` if the source cannot be read and
/// `InventoryParse` if it is not valid YAML.
pub fn reduce(src: &Path, dst: &Path) -> Result<ReduceSummary> {
    debug!(src = %src.display(), dst = %dst.display(), "reducing inventory");

    let contents = std::fs::read_to_string(src).map_err(|source| KubedError::InventoryRead {
        path: src.to_path_buf(),
        source,
    })?;
    let inventory: Inventory =
        serde_yaml::from_str(&contents).map_err(|source| KubedError::InventoryParse {
            path: src.to_path_buf(),
            source,
        })?;

    let mut map = ClusterMap::new();
    let mut summary = ReduceSummary::default();

    for (index, record) in inventory.clusters.iter().enumerate() {
        match record.fields() {
            Some((name, domain)) => {
                map.insert(name, &ClusterConfig::for_cluster(name, domain))?;
            }
            None => summary.skipped.push(SkippedRecord { index }),
        }
    }
    summary.written = map.len();

    std::fs::write(dst, map.to_yaml()?)?;

    debug!(
        written = summary.written,
        skipped = summary.skipped.len(),
        "inventory reduced"
    );
    Ok(summary)
}
