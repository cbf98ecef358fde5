//! Per-key async lock registry.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex as StdMutex, Weak};

use tokio::sync::Mutex;

/// Lazily-populated map of per-key exclusive sections.
///
/// Used for per-order serialization of mutating lifecycle operations and for
/// per-product atomicity of stock adjustments. The returned mutex is held
/// across await points, so it is a `tokio::sync::Mutex`; the registry itself
/// is only locked for the map lookup, never across an await.
///
/// The map holds weak references. A key whose lock no caller retains is
/// swept on the next miss, so the registry stays proportional to the keys
/// currently in use rather than every key ever seen.
#[derive(Default)]
pub(crate) struct LockRegistry<K> {
    locks: StdMutex<HashMap<K, Weak<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone> LockRegistry<K> {
    pub fn new() -> Self {
        Self {
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Returns the lock for `key`, creating it on first use.
    pub fn lock_for(&self, key: &K) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        if let Some(existing) = locks.get(key).and_then(Weak::upgrade) {
            return existing;
        }
        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(Mutex::new(()));
        locks.insert(key.clone(), Arc::downgrade(&lock));
        lock
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.locks.lock().unwrap().len()
    }
}
