//! Component identifier decomposition.

use crate::error::{PromoteError, Result};

/// Split a component identifier into `(base_name, version)`.
///
/// The version is the maximal trailing run of decimal digits, preceded by
/// a single separator character. Any non-alphanumeric character acts as a
/// separator (identifiers in the wild use `-` and `.`); a letter directly
/// before the digit run means the digits belong to the base name
/// (`...-V2` is not versioned). The separator and the digit run are both
/// removed from the base name:
///
/// ```
/// use promote_core::identifier::split_version;
///
/// let (base, version) = split_version("KP-SlotMachine-V2-22").unwrap();
/// assert_eq!(base, "KP-SlotMachine-V2");
/// assert_eq!(version, "22");
/// ```
///
/// Embedded digit groups stay in the base name; only the final trailing
/// run counts. Fails with `InvalidIdentifier` when there is no trailing
/// digit run, when the digit run is the whole string, or when nothing is
/// left of the base name after removing the separator and digits.
pub fn split_version(identifier: &str) -> Result<(String, String)> {
    let invalid = || PromoteError::InvalidIdentifier {
        identifier: identifier.to_string(),
    };

    // ASCII digits are single bytes, so byte index arithmetic stays on
    // char boundaries even with a multi-byte separator before the run.
    let digits_start = identifier
        .as_bytes()
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);

    // The whole string being digits leaves no base name; an empty digit
    // run means there is no version at all.
    if digits_start == 0 || digits_start == identifier.len() {
        return Err(invalid());
    }

    let version = &identifier[digits_start..];

    let separator = identifier[..digits_start]
        .chars()
        .next_back()
        .ok_or_else(invalid)?;
    if separator.is_ascii_alphanumeric() {
        // Trailing digits glued to a letter (e.g. "...-V2") are part of
        // the base name, not a version.
        return Err(invalid());
    }

    let base_name = &identifier[..digits_start - separator.len_utf8()];
    if base_name.is_empty() {
        return Err(invalid());
    }

    Ok((base_name.to_string(), version.to_string()))
}
