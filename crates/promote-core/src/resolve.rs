//! Path template expansion and object key resolution.

use crate::error::{PromoteError, Result};
use crate::identifier::split_version;
use crate::mapping::{ComponentMappingEntry, MappingTable};
use serde::{Deserialize, Serialize};

/// Version placeholder spellings accepted in path templates. `{version}`
/// is the original format; `{0}` is kept for backward compatibility.
const PLACEHOLDERS: [&str; 2] = ["{0}", "{version}"];

/// Environment prefixes stripped from template paths before the run's own
/// prefix is applied, so templates written with or without one resolve
/// identically.
const ENV_PREFIXES: [&str; 4] = ["dev/", "stage/", "prd/", "prod/"];

/// A fully resolved component: identifier, matched entry, extracted
/// version, and the concrete source/destination object keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedComponent {
    /// The raw input identifier.
    pub identifier: String,

    /// The mapping entry that won the prefix match.
    pub entry: ComponentMappingEntry,

    /// Version string extracted from the identifier.
    pub version: String,

    /// Concrete source object key (`{source_prefix}/...`).
    pub source_key: String,

    /// Concrete destination object key (`{destination_prefix}/...`).
    pub destination_key: String,
}

/// Count version placeholders in a template (both spellings).
pub fn placeholder_count(template: &str) -> usize {
    PLACEHOLDERS
        .iter()
        .map(|p| template.matches(p).count())
        .sum()
}

/// Substitute the version into the template's single placeholder.
///
/// The expanded path contains the version exactly once and is otherwise
/// byte-identical to the template. Zero or multiple placeholders is a
/// configuration defect (`InvalidTemplate`), validated again here as a
/// guard even though `MappingTable::new` already rejects such entries.
pub fn expand_template(entry: &ComponentMappingEntry, version: &str) -> Result<String> {
    let placeholders = placeholder_count(&entry.path_format);
    if placeholders != 1 {
        return Err(PromoteError::InvalidTemplate {
            component_key: entry.component_key.clone(),
            placeholders,
        });
    }

    let mut path = entry.path_format.clone();
    for placeholder in PLACEHOLDERS {
        path = path.replace(placeholder, version);
    }
    Ok(path)
}

/// Join an environment prefix and a template path with exactly one `/`,
/// regardless of leading/trailing separators on either side. A leading
/// known environment prefix on the path is stripped first.
pub fn join_key(prefix: &str, path: &str) -> String {
    let mut path = path.trim_start_matches('/');
    for env_prefix in ENV_PREFIXES {
        if let Some(rest) = path.strip_prefix(env_prefix) {
            path = rest;
            break;
        }
    }
    format!("{}/{}", prefix.trim_matches('/'), path)
}

/// Resolve a raw identifier against the mapping table into concrete
/// source and destination object keys.
pub fn resolve(
    identifier: &str,
    table: &MappingTable,
    source_prefix: &str,
    destination_prefix: &str,
) -> Result<ResolvedComponent> {
    let (base_name, version) = split_version(identifier)?;

    let entry = table
        .find_match(&base_name)
        .ok_or_else(|| PromoteError::NoMatch {
            base_name: base_name.clone(),
        })?;

    let path = expand_template(entry, &version)?;

    Ok(ResolvedComponent {
        identifier: identifier.to_string(),
        entry: entry.clone(),
        version,
        source_key: join_key(source_prefix, &path),
        destination_key: join_key(destination_prefix, &path),
    })
}
