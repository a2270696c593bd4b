//! Embedded JSON document store backed by plain files.
//!
//! Records are grouped into collections. Each collection is a directory under
//! the store root and each record is one pretty-printed JSON file inside it:
//!
//! ```text
//! <root>/
//!   <collection>/
//!     <key>.json
//!     <key>.json.tmp   (only while a write is in flight)
//! ```
//!
//! # Modules
//!
//! - [`store`] — the [`Store`] driver: `write`, `read`, `read_all`, `delete`
//! - [`locks`] — per-collection [`LockTable`]
//! - [`atomic`] — temp-file-then-rename writes
//! - [`codec`] — JSON encoding of records
//! - [`paths`] — (collection, key) to path mapping
//! - [`names`] — collection and key validation
//! - [`config`] — [`StoreConfig`]
//! - [`diagnostics`] — the injectable [`DiagnosticSink`]
//! - [`error`] — [`StoreError`]
//!
//! # Design Rules
//!
//! 1. A record file is never observable half-written (write-then-rename).
//! 2. Writes and deletes are serialized per collection, parallel across collections.
//! 3. Reads take no lock.
//! 4. Names are validated before any lock or I/O.
//! 5. All errors are returned to the caller; nothing panics or retries.
//!
//! ```no_run
//! use docfs_store::Store;
//! use serde_json::json;
//!
//! let store = Store::open("./data")?;
//! store.write("users", "tim", &json!({"name": "Tim", "age": "23"}))?;
//! let tim: serde_json::Value = store.read("users", "tim")?;
//! assert_eq!(tim["name"], "Tim");
//! # Ok::<(), docfs_store::StoreError>(())
//! ```

pub mod atomic;
pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod locks;
pub mod names;
pub mod paths;
pub mod store;

pub use config::{Indent, StoreConfig};
pub use diagnostics::{DiagnosticSink, Level, NullSink, TracingSink};
pub use error::{StoreError, StoreResult};
pub use locks::LockTable;
pub use store::Store;
