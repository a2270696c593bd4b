//! Mapping from (collection, key) to filesystem paths.
//!
//! These are pure joins; callers validate names first (see [`crate::names`]).

use std::io;
use std::path::{Component, Path, PathBuf};

/// Extension appended to every record file.
pub const RECORD_EXTENSION: &str = "json";

/// Suffix of the temporary file used by atomic writes.
pub const TMP_SUFFIX: &str = ".tmp";

/// `<root>/<collection>`
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// `<root>/<collection>/<key>.json`
pub fn record_path(root: &Path, collection: &str, key: &str) -> PathBuf {
    collection_dir(root, collection).join(format!("{key}.{RECORD_EXTENSION}"))
}

/// `<root>/<collection>/<key>`, for keys that already carry an extension.
pub fn raw_path(root: &Path, collection: &str, key: &str) -> PathBuf {
    collection_dir(root, collection).join(key)
}

/// `<path>.tmp`
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(TMP_SUFFIX);
    PathBuf::from(os)
}

/// Make `root` absolute and lexically clean it.
///
/// `.` components are dropped and `..` pops the previous component; no
/// symlinks are resolved and the path need not exist.
pub fn clean_root(root: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(root)?;
    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op.
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    Ok(cleaned)
}

/// Record key for a directory entry, if it looks like a record file.
pub(crate) fn key_of(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(RECORD_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}
