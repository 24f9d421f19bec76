//! Run configuration and JSON config file loading.
//!
//! Both input files are loaded once and are immutable for the run.
//! Loading errors are fatal: they surface before any storage call.

use std::path::Path;

use crate::error::{PromoteError, Result};
use crate::mapping::{ComponentMappingEntry, MappingTable};

/// Explicit configuration value for one promotion run. Threaded into the
/// orchestrator's entry point; no ambient/global state.
#[derive(Debug, Clone)]
pub struct PromotionConfig {
    /// Bucket holding both environments.
    pub bucket: String,

    /// Source environment prefix (e.g. `dev`).
    pub source_prefix: String,

    /// Destination environment prefix (e.g. `stage`).
    pub destination_prefix: String,

    /// When set, existence checks run but no copy is performed.
    pub dry_run: bool,
}

/// Load the mapping table from a JSON array of
/// `{ component_key, path_format }` records.
///
/// Fails fast on a missing/malformed file, missing fields, an empty
/// table, or any template without exactly one version placeholder.
pub fn load_mapping_file(path: &Path) -> Result<MappingTable> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<ComponentMappingEntry> = serde_json::from_str(&content)?;
    MappingTable::new(entries)
}

/// Load the identifier list from a JSON array of strings.
///
/// Fails on a missing/malformed file or an empty list.
pub fn load_identifier_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let identifiers: Vec<String> = serde_json::from_str(&content)?;
    if identifiers.is_empty() {
        return Err(PromoteError::Config(format!(
            "identifier file contains no components: {}",
            path.display()
        )));
    }
    Ok(identifiers)
}
