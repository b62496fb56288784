//! # Observer registry.
//!
//! Maps a [`SubscriptionId`] to the observer registered under it.
//!
//! ## Rules
//! - Ids are minted by the registry itself (monotonic, never reused).
//! - Notification order between observers is unspecified.
//! - [`Registry::snapshot`] copies the current observer set, so a settle keeps
//!   the set it started with even if the registry changes meanwhile.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::observers::Observe;

/// Opaque handle of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Registry of active observers.
pub(crate) struct Registry<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    observers: Mutex<HashMap<SubscriptionId, Arc<dyn Observe<A, R>>>>,
    next_id: AtomicU64,
}

impl<A, R> Registry<A, R>
where
    A: Send + Sync + 'static,
    R: Send + Sync + 'static,
{
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            observers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Stores `observer` under a fresh id.
    pub(crate) fn insert(&self, observer: Arc<dyn Observe<A, R>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().insert(id, observer);
        id
    }

    /// Removes the observer; returns `false` if it was already gone.
    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        self.observers.lock().remove(&id).is_some()
    }

    /// Returns `true` if `id` is registered.
    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.observers.lock().contains_key(&id)
    }

    /// Copies the current observer set.
    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn Observe<A, R>>> {
        self.observers.lock().values().cloned().collect()
    }

    /// Returns registered ids in ascending order.
    pub(crate) fn ids(&self) -> Vec<SubscriptionId> {
        let mut ids: Vec<SubscriptionId> = self.observers.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.lock().len()
    }
}
