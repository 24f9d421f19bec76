//! Component mapping table and longest-prefix matching.

use crate::error::{PromoteError, Result};
use crate::resolve::placeholder_count;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single mapping table entry: a component base-name pattern and the
/// path template its artifacts live under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentMappingEntry {
    /// Base-name prefix this entry matches (no version suffix).
    pub component_key: String,

    /// Path template with exactly one version placeholder
    /// (`{0}` or `{version}`).
    pub path_format: String,
}

/// Immutable mapping table, validated at construction.
///
/// The table is an unordered set: declaration order never influences
/// matching. Templates are checked for exactly one placeholder up front so
/// a bad configuration fails the run before any storage call.
#[derive(Debug, Clone)]
pub struct MappingTable {
    entries: Vec<ComponentMappingEntry>,
}

impl MappingTable {
    /// Build a table from entries, failing fast on malformed templates or
    /// empty keys.
    pub fn new(entries: Vec<ComponentMappingEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(PromoteError::Config(
                "mapping table contains no entries".to_string(),
            ));
        }

        for entry in &entries {
            if entry.component_key.is_empty() {
                return Err(PromoteError::Config(format!(
                    "mapping entry with empty component_key (path_format: {})",
                    entry.path_format
                )));
            }
            let placeholders = placeholder_count(&entry.path_format);
            if placeholders != 1 {
                return Err(PromoteError::InvalidTemplate {
                    component_key: entry.component_key.clone(),
                    placeholders,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (never true for a constructed table).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the best-matching entry for a version-stripped base name.
    ///
    /// An entry matches when `base_name` starts with its `component_key`;
    /// among matches the longest key wins. An equal-length tie can only
    /// come from duplicate keys (two distinct equal-length strings cannot
    /// both prefix the same base name) - a configuration anomaly. The
    /// entry with the lexicographically smallest `(component_key,
    /// path_format)` pair is picked deterministically and a warning is
    /// emitted.
    pub fn find_match(&self, base_name: &str) -> Option<&ComponentMappingEntry> {
        let mut best: Option<&ComponentMappingEntry> = None;

        for entry in &self.entries {
            if !base_name.starts_with(entry.component_key.as_str()) {
                continue;
            }
            match best {
                None => best = Some(entry),
                Some(current) => {
                    let key_len = entry.component_key.len();
                    let best_len = current.component_key.len();
                    if key_len > best_len {
                        best = Some(entry);
                    } else if key_len == best_len && entry != current {
                        warn!(
                            base_name = %base_name,
                            key = %entry.component_key,
                            "ambiguous mapping: duplicate entries match at equal key length"
                        );
                        let entry_rank = (&entry.component_key, &entry.path_format);
                        let best_rank = (&current.component_key, &current.path_format);
                        if entry_rank < best_rank {
                            best = Some(entry);
                        }
                    }
                }
            }
        }

        best
    }
}
