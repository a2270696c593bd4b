//! Write-then-rename file replacement.
//!
//! The bytes go to `<path>.tmp` first and are renamed over `<path>` only once
//! fully written, so `<path>` is always absent, the old content, or the new
//! content. Rename is atomic only within one filesystem; the temp file is
//! always a sibling of the target.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::paths::tmp_path;

/// Permission bits for record files.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Atomically replace `path` with `bytes`.
///
/// When `sync` is set the temp file is flushed to disk before the rename.
/// On failure the temp file is removed on a best-effort basis and `path` is
/// left as it was.
pub fn atomic_write(path: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    let tmp = tmp_path(path);

    let result = write_tmp(&tmp, bytes, sync).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        // Nothing useful to do if this fails too; the original error wins.
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_tmp(tmp: &Path, bytes: &[u8], sync: bool) -> io::Result<()> {
    let mut file = open_truncated(tmp)?;
    file.write_all(bytes)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

fn open_truncated(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tim.json");

        atomic_write(&path, b"{}\n", false).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"{}\n");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tim.json");
        fs::write(&path, b"old content that is longer\n").unwrap();

        atomic_write(&path, b"new\n", true).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new\n");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn overwrites_stale_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tim.json");
        fs::write(tmp_path(&path), b"garbage from an interrupted write").unwrap();

        atomic_write(&path, b"fresh\n", false).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"fresh\n");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_write_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tim.json");
        fs::write(&path, b"original\n").unwrap();
        // A directory squatting on the temp name makes the temp open fail.
        fs::create_dir(tmp_path(&path)).unwrap();

        assert!(atomic_write(&path, b"replacement\n", false).is_err());
        assert_eq!(fs::read(&path).unwrap(), b"original\n");
    }

    #[test]
    fn missing_parent_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("tim.json");

        let err = atomic_write(&path, b"{}\n", false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn new_files_get_standard_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tim.json");
        atomic_write(&path, b"{}\n", false).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // The process umask can only clear bits.
        assert_eq!(mode & !FILE_MODE, 0);
    }
}
