//! Session struct and state machine
//!
//! A session is one participant's token-backed connection attempt to a
//! real-time channel. Transitions are computed by a pure function of
//! the current status, the triggering event, and a caller-supplied
//! `now`, so the state machine never reads the ambient clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Token issued, channel not yet joined
    Ready,
    /// Participant is connected to the channel
    Joined,
    /// Participant left the channel
    Left,
    /// Token deadline passed before or during the connection
    Expired,
    /// Connection failed
    Failed,
}

impl SessionStatus {
    /// Stable wire code for this status
    pub fn code(&self) -> &'static str {
        match self {
            SessionStatus::Ready => "READY",
            SessionStatus::Joined => "JOINED",
            SessionStatus::Left => "LEFT",
            SessionStatus::Expired => "EXPIRED",
            SessionStatus::Failed => "FAILED",
        }
    }

    /// Whether this status ends the session lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Left | SessionStatus::Expired | SessionStatus::Failed
        )
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Event that drives a session transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Successful channel-join
    Join,
    /// Explicit leave
    Leave,
    /// Connection failure
    Fail,
    /// Token-expiry check
    Expire,
}

impl SessionEvent {
    /// The status this event attempts to reach
    pub fn target(&self) -> SessionStatus {
        match self {
            SessionEvent::Join => SessionStatus::Joined,
            SessionEvent::Leave => SessionStatus::Left,
            SessionEvent::Fail => SessionStatus::Failed,
            SessionEvent::Expire => SessionStatus::Expired,
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionEvent::Join => "join",
            SessionEvent::Leave => "leave",
            SessionEvent::Fail => "fail",
            SessionEvent::Expire => "expire",
        };
        f.write_str(name)
    }
}

/// Pure transition function for the session state machine
///
/// Computes the next status from the current status, the triggering
/// event, the supplied current time, and the token deadline. An
/// `Expire` event that is not due (or arrives on an already-terminal
/// session) returns the current status unchanged, which makes expiry
/// checks idempotent.
pub fn transition(
    status: SessionStatus,
    event: SessionEvent,
    now: DateTime<Utc>,
    token_expires_at: DateTime<Utc>,
) -> Result<SessionStatus, SessionError> {
    match (status, event) {
        (SessionStatus::Ready, SessionEvent::Join) => {
            if now >= token_expires_at {
                Err(SessionError::Expired {
                    expires_at: token_expires_at,
                    now,
                })
            } else {
                Ok(SessionStatus::Joined)
            }
        }
        (SessionStatus::Joined, SessionEvent::Leave) => Ok(SessionStatus::Left),
        (SessionStatus::Ready | SessionStatus::Joined, SessionEvent::Fail) => {
            Ok(SessionStatus::Failed)
        }
        (SessionStatus::Ready | SessionStatus::Joined, SessionEvent::Expire) => {
            if now >= token_expires_at {
                Ok(SessionStatus::Expired)
            } else {
                Ok(status)
            }
        }
        // Expiry checks on a terminal session are a no-op
        (_, SessionEvent::Expire) => Ok(status),
        (from, event) => Err(SessionError::InvalidTransition {
            from,
            to: event.target(),
            event,
        }),
    }
}

/// One participant's token-backed access window on a channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    id: String,
    /// Channel this session is scoped to
    channel_id: String,
    /// Current lifecycle status
    status: SessionStatus,
    /// When the access token was granted
    token_issued_at: DateTime<Utc>,
    /// When the access token stops being valid
    token_expires_at: DateTime<Utc>,
    /// Failure reason recorded by `mark_failed`
    failure_reason: Option<String>,
    /// When the session entered a terminal status
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Issue an access token for `channel_id`, creating a session in
    /// `Ready` with `token_expires_at = now + ttl`.
    pub fn issue(
        id: impl Into<String>,
        channel_id: impl Into<String>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let channel_id = channel_id.into();
        if ttl <= Duration::zero() {
            return Err(SessionError::InvalidArgument(format!(
                "ttl must be positive, got {}s",
                ttl.num_seconds()
            )));
        }
        if channel_id.is_empty() {
            return Err(SessionError::InvalidArgument(
                "channel_id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id: id.into(),
            channel_id,
            status: SessionStatus::Ready,
            token_issued_at: now,
            token_expires_at: now + ttl,
            failure_reason: None,
            ended_at: None,
        })
    }

    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the channel this session is scoped to
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Get the current status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// When the access token was granted
    pub fn token_issued_at(&self) -> DateTime<Utc> {
        self.token_issued_at
    }

    /// When the access token stops being valid
    pub fn token_expires_at(&self) -> DateTime<Utc> {
        self.token_expires_at
    }

    /// Failure reason recorded by `mark_failed`, if any
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// When the session entered a terminal status, if it has
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Join the channel
    ///
    /// Valid only from `Ready`. Joining with an expired token fails
    /// with `Expired` and moves the session to `Expired` in the same
    /// call, so a rejected join never leaves a stale `Ready` session
    /// behind.
    pub fn join(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        match transition(self.status, SessionEvent::Join, now, self.token_expires_at) {
            Ok(next) => {
                self.set_status(next, now);
                Ok(())
            }
            Err(err @ SessionError::Expired { .. }) => {
                self.set_status(SessionStatus::Expired, now);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Leave the channel. Valid only from `Joined`.
    pub fn leave(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let next = transition(self.status, SessionEvent::Leave, now, self.token_expires_at)?;
        self.set_status(next, now);
        Ok(())
    }

    /// Record a terminal connection failure. Valid from `Ready` or
    /// `Joined`; the reason is stored and retrievable afterwards.
    pub fn mark_failed(
        &mut self,
        reason: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let next = transition(self.status, SessionEvent::Fail, now, self.token_expires_at)?;
        self.failure_reason = Some(reason.into());
        self.set_status(next, now);
        Ok(())
    }

    /// Expire the session if its token deadline has passed
    ///
    /// Idempotent. Returns whether this call moved the session to
    /// `Expired`.
    pub fn check_expiry(&mut self, now: DateTime<Utc>) -> bool {
        match transition(self.status, SessionEvent::Expire, now, self.token_expires_at) {
            Ok(next) if next != self.status => {
                self.set_status(next, now);
                true
            }
            _ => false,
        }
    }

    fn set_status(&mut self, next: SessionStatus, now: DateTime<Utc>) {
        self.status = next;
        if next.is_terminal() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}
