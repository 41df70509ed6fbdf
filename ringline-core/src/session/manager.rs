//! SessionManager for the in-memory session registry
//!
//! Every transition runs under the registry write lock, which gives
//! each session single-writer discipline: a `join` and a `check_expiry`
//! on the same session can never interleave. Operations on different
//! sessions share no mutable state beyond the map itself.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::SessionPolicy;
use crate::error::SessionError;

use super::state::{Session, SessionStatus};

/// Manages the registry of call sessions
///
/// SessionManager provides:
/// - Token issuance with unique session IDs
/// - Per-session transitions by ID
/// - Expiry sweeps and retention purges
/// - Exclusive per-session access via the callback pattern
pub struct SessionManager {
    /// Sessions indexed by ID
    sessions: RwLock<HashMap<String, Session>>,
    /// Lifecycle policy (default TTL, retention window)
    policy: SessionPolicy,
}

impl SessionManager {
    /// Create a new SessionManager with the given policy
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// The lifecycle policy this manager was built with
    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Issue an access token for `channel_id` and register the new
    /// session in `Ready`.
    ///
    /// Returns the generated session ID.
    pub async fn issue_token(
        &self,
        channel_id: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let id = Uuid::new_v4().to_string();
        let session = Session::issue(id.clone(), channel_id, ttl, now)?;

        self.sessions.write().await.insert(id.clone(), session);
        tracing::debug!(session_id = %id, channel_id, "issued session token");
        Ok(id)
    }

    /// Issue a token using the policy's default TTL
    pub async fn issue_token_default(
        &self,
        channel_id: &str,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        self.issue_token(channel_id, self.policy.default_ttl, now)
            .await
    }

    /// Issue a token under a caller-chosen session ID
    ///
    /// Rejects IDs that are already registered.
    pub async fn issue_token_with_id(
        &self,
        id: &str,
        channel_id: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(id) {
            return Err(SessionError::InvalidArgument(format!(
                "session ID '{}' already exists",
                id
            )));
        }

        let session = Session::issue(id, channel_id, ttl, now)?;
        sessions.insert(id.to_string(), session);
        Ok(id.to_string())
    }

    /// Run `f` with exclusive access to one session
    ///
    /// The write lock is held for the duration of the callback, so the
    /// caller observes and mutates the session without interleaving.
    pub async fn with_session<F, R>(&self, id: &str, f: F) -> Result<R, SessionError>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(f(session))
    }

    /// Join the channel for the session with the given ID
    pub async fn join(&self, id: &str, now: DateTime<Utc>) -> Result<(), SessionError> {
        self.with_session(id, |session| session.join(now)).await?
    }

    /// Leave the channel for the session with the given ID
    pub async fn leave(&self, id: &str, now: DateTime<Utc>) -> Result<(), SessionError> {
        self.with_session(id, |session| session.leave(now)).await?
    }

    /// Record a terminal connection failure for the session
    pub async fn mark_failed(
        &self,
        id: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.with_session(id, |session| session.mark_failed(reason, now))
            .await?
    }

    /// Expire the session if its token deadline has passed
    ///
    /// Returns whether this call expired the session.
    pub async fn check_expiry(&self, id: &str, now: DateTime<Utc>) -> Result<bool, SessionError> {
        self.with_session(id, |session| session.check_expiry(now))
            .await
    }

    /// Get session status by ID
    pub async fn status(&self, id: &str) -> Result<SessionStatus, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(session.status())
    }

    /// Get the recorded failure reason by ID, if any
    pub async fn failure_reason(&self, id: &str) -> Result<Option<String>, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(session.failure_reason().map(|s| s.to_string()))
    }

    /// Get a point-in-time copy of one session
    pub async fn snapshot(&self, id: &str) -> Result<Session, SessionError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        Ok(session.clone())
    }

    /// List all session IDs
    pub async fn list_sessions(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }

    /// List sessions with their statuses
    pub async fn list_sessions_with_status(&self) -> Vec<(String, SessionStatus)> {
        self.sessions
            .read()
            .await
            .iter()
            .map(|(id, session)| (id.clone(), session.status()))
            .collect()
    }

    /// Remove a session
    pub async fn remove_session(&self, id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(id).is_none() {
            return Err(SessionError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Get the number of registered sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Expire every live session whose token deadline has passed
    ///
    /// Returns the IDs expired by this sweep. Sessions already in a
    /// terminal status are untouched, so the sweep is idempotent.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut sessions = self.sessions.write().await;
        let mut expired = Vec::new();
        for (id, session) in sessions.iter_mut() {
            if session.check_expiry(now) {
                expired.push(id.clone());
            }
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "expired sessions past token deadline");
        }
        expired
    }

    /// Remove terminal sessions whose retention window has elapsed
    ///
    /// A session is purged once it has been terminal for at least
    /// `policy.retention`. Returns the removed IDs.
    pub async fn purge_terminal(&self, now: DateTime<Utc>) -> Vec<String> {
        let retention = self.policy.retention;
        let mut sessions = self.sessions.write().await;
        let purged: Vec<String> = sessions
            .iter()
            .filter(|(_, session)| {
                session.status().is_terminal()
                    && session
                        .ended_at()
                        .is_some_and(|ended| now - ended >= retention)
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in &purged {
            sessions.remove(id);
        }
        if !purged.is_empty() {
            tracing::info!(count = purged.len(), "purged terminal sessions past retention");
        }
        purged
    }
}
