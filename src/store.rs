//! Process-wide snapshot of the current [`RecordCollection`].

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::types::RecordCollection;

/// Holds the current collection as an immutable, atomically replaceable snapshot.
///
/// Readers clone the inner `Arc` and keep a consistent view for as long as they hold it;
/// [`SnapshotStore::replace`] swaps in a new collection without touching the old one.
/// A store that has never been populated is "not ready", which is distinct from holding an
/// empty collection.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<RecordCollection>>>,
}

/// Readiness probe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health {
    pub ready: bool,
    pub rows_loaded: usize,
}

impl SnapshotStore {
    /// An empty, not-yet-ready store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that is ready with `collection`.
    pub fn with_collection(collection: RecordCollection) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(collection))),
        }
    }

    /// Swap in a new collection, returning the previous snapshot (if any).
    pub fn replace(&self, collection: RecordCollection) -> Option<Arc<RecordCollection>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.replace(Arc::new(collection))
    }

    /// The current snapshot, or `None` if the store was never populated.
    pub fn snapshot(&self) -> Option<Arc<RecordCollection>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn health(&self) -> Health {
        match self.snapshot() {
            Some(collection) => Health {
                ready: true,
                rows_loaded: collection.len(),
            },
            None => Health {
                ready: false,
                rows_loaded: 0,
            },
        }
    }
}
