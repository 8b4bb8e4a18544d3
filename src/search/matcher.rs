//! Case-insensitive substring and prefix matching.
//!
//! Queries are normalized once with [`normalize`]; the field side is
//! lowercased on every comparison. [`collation_key`] gives the ordering key
//! used for alphabetical sorts.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Trim and lowercase a raw query.
///
/// Returns `None` for empty or whitespace-only input, which callers treat as
/// "no match" and clear all derived state.
#[must_use]
pub fn normalize(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// True if `field` contains the already-normalized query.
#[must_use]
pub fn contains(field: &str, normalized: &str) -> bool {
    !normalized.is_empty() && field.to_lowercase().contains(normalized)
}

/// True if `field` starts with the already-normalized query.
#[must_use]
pub fn starts_with(field: &str, normalized: &str) -> bool {
    !normalized.is_empty() && field.to_lowercase().starts_with(normalized)
}

/// Sort key for alphabetical ordering: diacritics stripped, then lowercased.
///
/// "Écharpe" keys as "echarpe", so it sorts between "atlas" and "Zebra"
/// rather than after every ASCII name.
#[must_use]
pub fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
