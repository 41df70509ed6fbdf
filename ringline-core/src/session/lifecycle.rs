//! Session maintenance sweeps
//!
//! Combines the token-expiry sweep with the retention purge. Each
//! sweep is a single pass over the registry at a caller-supplied
//! `now`; scheduling belongs to the embedding application.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::manager::SessionManager;

/// Runs maintenance passes over a session registry
pub struct SessionLifecycleManager {
    session_manager: Arc<SessionManager>,
}

/// Result of one maintenance sweep
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Sessions moved to EXPIRED by this sweep
    pub expired: Vec<String>,
    /// Terminal sessions removed after the retention window
    pub purged: Vec<String>,
}

impl SessionLifecycleManager {
    /// Create a new lifecycle manager
    pub fn new(session_manager: Arc<SessionManager>) -> Self {
        Self { session_manager }
    }

    /// Run one expiry-and-retention pass
    ///
    /// Expires live sessions past their token deadline, then purges
    /// terminal sessions past retention. A session expired by this
    /// pass is only purged by a later pass once its retention window
    /// has elapsed.
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> SweepResult {
        let expired = self.session_manager.sweep_expired(now).await;
        let purged = self.session_manager.purge_terminal(now).await;

        tracing::debug!(
            expired = expired.len(),
            purged = purged.len(),
            "maintenance sweep complete"
        );
        SweepResult { expired, purged }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionPolicy;
    use crate::session::state::SessionStatus;
    use chrono::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn create_test_lifecycle() -> (SessionLifecycleManager, Arc<SessionManager>) {
        let manager = Arc::new(SessionManager::new(SessionPolicy {
            default_ttl: Duration::seconds(60),
            retention: Duration::seconds(100),
        }));
        let lifecycle = SessionLifecycleManager::new(manager.clone());
        (lifecycle, manager)
    }

    #[tokio::test]
    async fn sweep_expires_overdue_sessions() {
        let (lifecycle, manager) = create_test_lifecycle();
        let id = manager
            .issue_token("room-1", Duration::seconds(5), at(0))
            .await
            .unwrap();

        let result = lifecycle.run_sweep(at(10)).await;

        assert_eq!(result.expired, vec![id.clone()]);
        assert!(result.purged.is_empty());
        assert_eq!(manager.status(&id).await.unwrap(), SessionStatus::Expired);
    }

    #[tokio::test]
    async fn sweep_purges_only_after_retention() {
        let (lifecycle, manager) = create_test_lifecycle();
        let id = manager
            .issue_token("room-1", Duration::seconds(5), at(0))
            .await
            .unwrap();

        // First sweep expires at t=10; retention runs from there
        let result = lifecycle.run_sweep(at(10)).await;
        assert_eq!(result.expired, vec![id.clone()]);
        assert!(result.purged.is_empty());

        // Within retention: nothing to do
        let result = lifecycle.run_sweep(at(50)).await;
        assert!(result.expired.is_empty());
        assert!(result.purged.is_empty());

        // Past retention: the expired session is removed
        let result = lifecycle.run_sweep(at(120)).await;
        assert!(result.expired.is_empty());
        assert_eq!(result.purged, vec![id]);
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn sweep_with_same_now_is_idempotent() {
        let (lifecycle, manager) = create_test_lifecycle();
        let id = manager
            .issue_token("room-1", Duration::seconds(5), at(0))
            .await
            .unwrap();

        let first = lifecycle.run_sweep(at(10)).await;
        assert_eq!(first.expired, vec![id.clone()]);

        let second = lifecycle.run_sweep(at(10)).await;
        assert!(second.expired.is_empty());
        assert!(second.purged.is_empty());
        assert_eq!(manager.status(&id).await.unwrap(), SessionStatus::Expired);
    }

    #[tokio::test]
    async fn sweep_on_empty_registry_is_empty() {
        let (lifecycle, _manager) = create_test_lifecycle();

        let result = lifecycle.run_sweep(at(10)).await;

        assert!(result.expired.is_empty());
        assert!(result.purged.is_empty());
    }
}
