//! Collection and resource-key validation.
//!
//! Names are used verbatim as single path segments under the store root, so
//! anything that could escape that segment is rejected:
//! - Must be non-empty
//! - Must not contain `/`, `\` or NUL
//! - Must not be `.` or `..`, nor contain `..`
//! - Must not end with `.tmp` (reserved for in-flight writes)
//!
//! Dots elsewhere are fine, so a key may already carry a `.json` extension.

use crate::error::{StoreError, StoreResult};
use crate::paths::TMP_SUFFIX;

/// Characters that are forbidden anywhere in a name.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

/// Validate a collection name, returning `Ok(())` if it is a safe segment.
///
/// # Examples
///
/// ```
/// use docfs_store::names::validate_collection;
///
/// assert!(validate_collection("users").is_ok());
/// assert!(validate_collection("").is_err());
/// assert!(validate_collection("../etc").is_err());
/// ```
pub fn validate_collection(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::MissingCollection);
    }
    validate_segment(name)
}

/// Validate a resource key. Same rules as collection names.
pub fn validate_key(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::MissingResource);
    }
    validate_segment(name)
}

fn validate_segment(name: &str) -> StoreResult<()> {
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
        }
    }

    if name == "." {
        return Err(invalid(name, "must not be '.'".into()));
    }

    // Covers ".." itself as well as names like "a..b".
    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'".into()));
    }

    if name.ends_with(TMP_SUFFIX) {
        return Err(invalid(name, format!("must not end with '{TMP_SUFFIX}'")));
    }

    Ok(())
}

fn invalid(name: &str, reason: String) -> StoreError {
    StoreError::InvalidName {
        name: name.to_string(),
        reason,
    }
}
