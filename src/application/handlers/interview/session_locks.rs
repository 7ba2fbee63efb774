//! Per-session serialization of read-modify-write cycles.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::foundation::SessionId;

/// Registry of one async mutex per session id.
///
/// Handlers hold the guard from load until save, so two requests for the same
/// session never interleave while different sessions proceed in parallel.
#[derive(Default)]
pub struct SessionLocks {
    locks: RwLock<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    ///
    /// The lock entry is created on first use.
    pub async fn acquire(&self, session_id: &SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.write().await;
            locks
                .entry(session_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Take the session's lock only if nobody holds it right now.
    pub async fn try_acquire(&self, session_id: &SessionId) -> Option<OwnedMutexGuard<()>> {
        let lock = {
            let mut locks = self.locks.write().await;
            locks
                .entry(session_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.try_lock_owned().ok()
    }

    /// Drop entries nobody holds or waits on.
    ///
    /// # Returns
    ///
    /// Number of entries removed.
    pub async fn prune(&self) -> usize {
        let mut locks = self.locks.write().await;
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    /// Number of tracked sessions (for monitoring).
    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.locks.read().await.is_empty()
    }
}
