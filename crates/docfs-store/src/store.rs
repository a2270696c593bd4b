use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::atomic::atomic_write;
use crate::codec::{decode, encode};
use crate::config::StoreConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{StoreError, StoreResult};
use crate::locks::{acquire, LockTable};
use crate::names::{validate_collection, validate_key};
use crate::paths::{self, TMP_SUFFIX};

/// Permission bits for the root and collection directories.
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// File-backed JSON document store.
///
/// Records live at `<root>/<collection>/<key>.json`. Writes and deletes on
/// the same collection are serialized by a per-collection lock owned by this
/// instance; reads take no lock and see either the old or the new content of
/// a record, never a partial file.
pub struct Store {
    root: PathBuf,
    config: StoreConfig,
    locks: LockTable,
    sink: Arc<dyn DiagnosticSink>,
}

impl Store {
    /// Open the store at `root` with default settings, creating the
    /// directory if needed.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::with_config(StoreConfig::new(root.as_ref()))
    }

    /// Open a store described by `config`, logging through [`TracingSink`].
    pub fn with_config(config: StoreConfig) -> StoreResult<Self> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Open a store that reports diagnostics to `sink`.
    pub fn with_sink(config: StoreConfig, sink: Arc<dyn DiagnosticSink>) -> StoreResult<Self> {
        let root = paths::clean_root(&config.root)?;

        if root.is_dir() {
            sink.debug(&format!(
                "using '{}' (database already exists)",
                root.display()
            ));
        } else {
            sink.debug(&format!("creating the database at '{}'", root.display()));
            create_dirs(&root)?;
        }

        Ok(Self {
            root,
            config,
            locks: LockTable::new(),
            sink,
        })
    }

    /// Absolute, cleaned root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- Core operations ----

    /// Write `value` as the record `key` in `collection`, replacing any
    /// previous record. Creates the collection on first use.
    pub fn write<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        validate_collection(collection)?;
        validate_key(key)?;

        let bytes = encode(value, self.config.indent)?;

        let lock = self.locks.lock_for(collection);
        let _guard = acquire(&lock);

        let dir = paths::collection_dir(&self.root, collection);
        create_dirs(&dir)?;

        let path = paths::record_path(&self.root, collection, key);
        if let Err(e) = atomic_write(&path, &bytes, self.config.sync_writes) {
            self.sink.warn(&format!(
                "write of '{}' failed, record left unchanged: {e}",
                path.display()
            ));
            return Err(e.into());
        }

        self.sink.debug(&format!(
            "wrote {collection}/{key} ({} bytes)",
            bytes.len()
        ));
        Ok(())
    }

    /// Read the record `key` from `collection` into a `T`.
    ///
    /// `key` is looked up as given first and then with `.json` appended, so
    /// both `"tim"` and `"tim.json"` address the same record.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, key: &str) -> StoreResult<T> {
        validate_collection(collection)?;
        validate_key(key)?;

        let path = self
            .locate_record(collection, key)
            .ok_or_else(|| self.not_found(collection, key))?;
        let bytes = fs::read(&path)?;
        self.sink.trace(&format!("read {collection}/{key}"));
        decode(&bytes)
    }

    /// Raw contents of every record in `collection`, in directory order.
    ///
    /// Subdirectories and in-flight temp files are skipped. Any unreadable
    /// file fails the whole call.
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        validate_collection(collection)?;
        let dir = self.existing_collection(collection)?;

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() || is_tmp(&entry.file_name()) {
                continue;
            }
            records.push(fs::read_to_string(entry.path())?);
        }

        self.sink.trace(&format!(
            "read {} records from {collection}",
            records.len()
        ));
        Ok(records)
    }

    /// Delete a record, or the whole collection when `key` is empty.
    ///
    /// A key that names a subdirectory removes that directory tree. Missing
    /// targets are reported as not found.
    pub fn delete(&self, collection: &str, key: &str) -> StoreResult<()> {
        validate_collection(collection)?;
        if !key.is_empty() {
            validate_key(key)?;
        }

        let lock = self.locks.lock_for(collection);
        let _guard = acquire(&lock);

        if key.is_empty() {
            let dir = self.existing_collection(collection)?;
            fs::remove_dir_all(&dir)?;
            self.sink.debug(&format!("deleted collection {collection}"));
            return Ok(());
        }

        let raw = paths::raw_path(&self.root, collection, key);
        if raw.is_dir() {
            fs::remove_dir_all(&raw)?;
            self.sink.debug(&format!("deleted directory {collection}/{key}"));
            return Ok(());
        }

        let path = self
            .locate_record(collection, key)
            .ok_or_else(|| self.not_found(collection, key))?;
        fs::remove_file(&path)?;
        self.sink.debug(&format!("deleted {collection}/{key}"));
        Ok(())
    }

    // ---- Convenience operations ----

    /// Remove `collection` and every record in it.
    pub fn delete_collection(&self, collection: &str) -> StoreResult<()> {
        self.delete(collection, "")
    }

    /// Decode every record in `collection` into a `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.read_all(collection)?
            .iter()
            .map(|raw| decode(raw.as_bytes()))
            .collect()
    }

    /// Sorted keys of the `*.json` records in `collection`.
    pub fn keys(&self, collection: &str) -> StoreResult<Vec<String>> {
        validate_collection(collection)?;
        let dir = self.existing_collection(collection)?;

        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(key) = entry.file_name().to_str().and_then(paths::key_of) {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Whether a record exists for `key` in `collection`.
    pub fn exists(&self, collection: &str, key: &str) -> StoreResult<bool> {
        validate_collection(collection)?;
        validate_key(key)?;
        Ok(self.locate_record(collection, key).is_some())
    }

    /// Sorted names of all collections under the root.
    pub fn collections(&self) -> StoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => self
                    .sink
                    .warn(&format!("skipping non UTF-8 collection name {name:?}")),
            }
        }
        names.sort();
        Ok(names)
    }

    // ---- Internals ----

    /// First of `<key>` and `<key>.json` that is a regular file.
    fn locate_record(&self, collection: &str, key: &str) -> Option<PathBuf> {
        [
            paths::raw_path(&self.root, collection, key),
            paths::record_path(&self.root, collection, key),
        ]
        .into_iter()
        .find(|p| p.is_file())
    }

    fn existing_collection(&self, collection: &str) -> StoreResult<PathBuf> {
        let dir = paths::collection_dir(&self.root, collection);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(StoreError::CollectionNotFound(collection.to_string()))
        }
    }

    fn not_found(&self, collection: &str, key: &str) -> StoreError {
        if paths::collection_dir(&self.root, collection).is_dir() {
            StoreError::RecordNotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            }
        } else {
            StoreError::CollectionNotFound(collection.to_string())
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("locks", &self.locks)
            .finish()
    }
}

fn create_dirs(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

fn is_tmp(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.ends_with(TMP_SUFFIX))
}
