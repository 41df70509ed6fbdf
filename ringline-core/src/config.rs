//! Configuration for the session lifecycle policy
//!
//! TOML files parse into `RawRinglineConfig` with optional fields so
//! layered configs merge cleanly (overlay wins only where set);
//! `finalize` applies defaults to produce the final config.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default token TTL in seconds
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Default retention for terminal sessions in seconds
pub const DEFAULT_RETENTION_SECS: i64 = 3600;

/// Configuration as stored in TOML files (optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawRinglineConfig {
    #[serde(default)]
    pub session: RawSessionConfig,
}

/// Session section as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSessionConfig {
    /// Token TTL in seconds for new sessions
    pub default_ttl_secs: Option<i64>,

    /// How long terminal sessions stay queryable before purge
    pub retention_secs: Option<i64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RinglineConfig {
    #[serde(default)]
    pub session: SessionConfig,
}

/// Session section with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token TTL in seconds for new sessions
    pub default_ttl_secs: i64,

    /// How long terminal sessions stay queryable before purge
    pub retention_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_TTL_SECS,
            retention_secs: DEFAULT_RETENTION_SECS,
        }
    }
}

impl RinglineConfig {
    /// Load config from a path; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let raw: RawRinglineConfig = toml::from_str(&contents)?;
        let config = Self::finalize(raw);
        config.validate()?;
        Ok(config)
    }

    /// Merge two raw configs (overlay overrides base only where set)
    pub fn merge_raw(base: RawRinglineConfig, overlay: RawRinglineConfig) -> RawRinglineConfig {
        RawRinglineConfig {
            session: RawSessionConfig {
                default_ttl_secs: overlay
                    .session
                    .default_ttl_secs
                    .or(base.session.default_ttl_secs),
                retention_secs: overlay.session.retention_secs.or(base.session.retention_secs),
            },
        }
    }

    /// Convert a raw config to the final config with defaults applied
    pub fn finalize(raw: RawRinglineConfig) -> Self {
        Self {
            session: SessionConfig {
                default_ttl_secs: raw.session.default_ttl_secs.unwrap_or(DEFAULT_TTL_SECS),
                retention_secs: raw.session.retention_secs.unwrap_or(DEFAULT_RETENTION_SECS),
            },
        }
    }

    /// Reject values the session manager cannot operate with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.default_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue(format!(
                "session.default_ttl_secs must be positive, got {}",
                self.session.default_ttl_secs
            )));
        }
        if self.session.retention_secs < 0 {
            return Err(ConfigError::InvalidValue(format!(
                "session.retention_secs must not be negative, got {}",
                self.session.retention_secs
            )));
        }
        Ok(())
    }

    /// Policy view consumed by the session manager
    pub fn policy(&self) -> SessionPolicy {
        SessionPolicy {
            default_ttl: Duration::seconds(self.session.default_ttl_secs),
            retention: Duration::seconds(self.session.retention_secs),
        }
    }
}

/// Lifecycle policy consumed by `SessionManager`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// TTL used by `issue_token_default`
    pub default_ttl: Duration,
    /// How long terminal sessions survive before purge
    pub retention: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        RinglineConfig::default().policy()
    }
}
