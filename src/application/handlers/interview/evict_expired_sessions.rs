//! EvictExpiredSessionsHandler - Periodic cleanup of idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::Timestamp;
use crate::domain::interview::FlowError;
use crate::ports::SessionStore;

use super::{store_error, SessionLocks};

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvictionReport {
    pub evicted_sessions: usize,
    /// Idle sessions left alone because a request held their lock.
    pub busy_sessions: usize,
    pub pruned_locks: usize,
}

/// Removes sessions idle for longer than the configured expiry.
pub struct EvictExpiredSessionsHandler {
    store: Arc<dyn SessionStore>,
    locks: Arc<SessionLocks>,
    expiry_hours: i64,
}

impl EvictExpiredSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: Arc<SessionLocks>, expiry_hours: i64) -> Self {
        Self {
            store,
            locks,
            expiry_hours,
        }
    }

    /// Sweep every `every` until the shutdown signal turns true.
    ///
    /// Failed sweeps are logged and retried on the next tick.
    pub async fn run(&self, every: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(every);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Session eviction stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.handle(Timestamp::now()).await {
                        tracing::warn!(error = %e, "Session eviction sweep failed");
                    }
                }
            }
        }
    }

    /// One sweep. Each idle session is deleted under its own lock; sessions
    /// locked by an in-flight request are left for a later sweep.
    pub async fn handle(&self, now: Timestamp) -> Result<EvictionReport, FlowError> {
        let cutoff = now.minus_hours(self.expiry_hours);
        let candidates = self.store.idle_since(cutoff).await.map_err(store_error)?;
        let mut report = EvictionReport::default();

        for session_id in candidates {
            let Some(_guard) = self.locks.try_acquire(&session_id).await else {
                tracing::debug!(session_id = %session_id, "Session busy, eviction deferred");
                report.busy_sessions += 1;
                continue;
            };

            let still_idle = self
                .store
                .get(&session_id)
                .await
                .map_err(store_error)?
                .is_some_and(|state| state.is_idle_since(&cutoff));
            if still_idle && self.store.delete(&session_id).await.map_err(store_error)? {
                tracing::debug!(session_id = %session_id, "Session expired");
                report.evicted_sessions += 1;
            }
        }

        report.pruned_locks = self.locks.prune().await;
        if report.evicted_sessions > 0 || report.busy_sessions > 0 {
            tracing::info!(
                count = report.evicted_sessions,
                busy = report.busy_sessions,
                pruned_locks = report.pruned_locks,
                "Evicted idle sessions"
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySessionStore;
    use crate::domain::foundation::SessionId;
    use crate::domain::interview::{ConversationState, QuestionCatalog};

    #[tokio::test]
    async fn test_only_idle_sessions_are_evicted() {
        let store = Arc::new(InMemorySessionStore::new());
        let catalog = QuestionCatalog::builtin();
        let now = Timestamp::now();

        let stale = ConversationState::new(SessionId::generate(), &catalog, now.minus_hours(25));
        let fresh = ConversationState::new(SessionId::generate(), &catalog, now.minus_hours(1));
        store.put(&stale).await.unwrap();
        store.put(&fresh).await.unwrap();

        let locks = Arc::new(SessionLocks::new());
        drop(locks.acquire(&stale.session_id).await);

        let report = EvictExpiredSessionsHandler::new(store.clone(), locks.clone(), 24)
            .handle(now)
            .await
            .unwrap();

        assert_eq!(report.evicted_sessions, 1);
        assert_eq!(report.pruned_locks, 1);
        assert!(store.get(&stale.session_id).await.unwrap().is_none());
        assert!(store.get(&fresh.session_id).await.unwrap().is_some());
        assert!(locks.is_empty().await);
    }

    #[tokio::test]
    async fn test_locked_session_is_not_evicted() {
        let store = Arc::new(InMemorySessionStore::new());
        let now = Timestamp::now();
        let stale = ConversationState::new(
            SessionId::generate(),
            &QuestionCatalog::builtin(),
            now.minus_hours(25),
        );
        store.put(&stale).await.unwrap();

        let locks = Arc::new(SessionLocks::new());
        let handler = EvictExpiredSessionsHandler::new(store.clone(), locks.clone(), 24);

        let guard = locks.acquire(&stale.session_id).await;
        let report = handler.handle(now).await.unwrap();
        assert_eq!(report.evicted_sessions, 0);
        assert_eq!(report.busy_sessions, 1);
        assert!(store.get(&stale.session_id).await.unwrap().is_some());

        drop(guard);
        let report = handler.handle(now).await.unwrap();
        assert_eq!(report.evicted_sessions, 1);
        assert!(store.get(&stale.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_store_reports_nothing() {
        let handler = EvictExpiredSessionsHandler::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(SessionLocks::new()),
            24,
        );
        assert_eq!(handler.handle(Timestamp::now()).await.unwrap(), EvictionReport::default());
    }

    #[tokio::test]
    async fn test_huge_expiry_evicts_nothing() {
        let store = Arc::new(InMemorySessionStore::new());
        let state = ConversationState::new(
            SessionId::generate(),
            &QuestionCatalog::builtin(),
            Timestamp::now().minus_hours(48),
        );
        store.put(&state).await.unwrap();

        let handler =
            EvictExpiredSessionsHandler::new(store.clone(), Arc::new(SessionLocks::new()), 10_000_000_000);
        let report = handler.handle(Timestamp::now()).await.unwrap();

        assert_eq!(report.evicted_sessions, 0);
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let store = Arc::new(InMemorySessionStore::new());
        let stale = ConversationState::new(
            SessionId::generate(),
            &QuestionCatalog::builtin(),
            Timestamp::now().minus_hours(48),
        );
        store.put(&stale).await.unwrap();

        let handler = EvictExpiredSessionsHandler::new(store.clone(), Arc::new(SessionLocks::new()), 24);
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            handler.run(Duration::from_millis(10), rx).await;
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("eviction loop did not stop")
            .unwrap();

        assert_eq!(store.len().await.unwrap(), 0);
    }
}
