//! Error types for ringline-core

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::session::{SessionEvent, SessionStatus};

/// Top-level error type for ringline-core
#[derive(Error, Debug)]
pub enum RinglineError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] UnknownCodeError),
}

/// Errors from session transitions and the session registry
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Invalid transition from {from} to {to} on {event}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
        event: SessionEvent,
    },

    #[error("Token expired at {expires_at} (now {now})")]
    Expired {
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors from loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// A code string outside one of the closed catalogs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} code: {code}")]
pub struct UnknownCodeError {
    /// Which catalog rejected the code
    pub kind: &'static str,
    /// The offending code string
    pub code: String,
}
