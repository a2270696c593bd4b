use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-store registry of collection locks.
///
/// Each collection gets one exclusive lock, created on first use and never
/// removed. The map itself sits behind its own mutex which is only held for
/// the lookup, so callers on different collections never wait on each other.
#[derive(Default)]
pub struct LockTable {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockTable {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lock for `collection`, inserting it if absent.
    pub fn lock_for(&self, collection: &str) -> Arc<Mutex<()>> {
        // The guarded data is `()`, so a poisoned table or lock carries no
        // broken state and is safe to reuse.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            locks
                .entry(collection.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Number of collections that have ever been locked.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no collection has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Acquire a collection lock, ignoring poisoning.
pub(crate) fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl std::fmt::Debug for LockTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockTable")
            .field("collections", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn same_collection_shares_lock() {
        let table = LockTable::new();
        let a = table.lock_for("users");
        let b = table.lock_for("users");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn different_collections_get_different_locks() {
        let table = LockTable::new();
        let a = table.lock_for("users");
        let b = table.lock_for("orders");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn entries_are_never_removed() {
        let table = LockTable::new();
        assert!(table.is_empty());
        drop(table.lock_for("users"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn holding_one_collection_does_not_block_another() {
        let table = Arc::new(LockTable::new());
        let users = table.lock_for("users");
        let _held = acquire(&users);

        let other = Arc::clone(&table);
        let handle = thread::spawn(move || {
            let orders = other.lock_for("orders");
            let _guard = acquire(&orders);
            true
        });
        assert!(handle.join().expect("thread should not panic"));
    }

    #[test]
    fn same_collection_is_serialized() {
        let table = Arc::new(LockTable::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                thread::spawn(move || {
                    let lock = table.lock_for("users");
                    let _guard = acquire(&lock);
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(2));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }
}
