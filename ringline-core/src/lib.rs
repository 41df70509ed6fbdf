//! ringline-core: session lifecycle core for the ringline call backend
//!
//! This crate provides the foundational value types and state machine
//! for ringline:
//!
//! - **Session lifecycle** - [`Session`] and [`SessionManager`] for token-backed
//!   call sessions (READY → JOINED → LEFT, with EXPIRED and FAILED branches)
//! - **Maintenance sweeps** - [`SessionLifecycleManager`] for token-expiry
//!   sweeps and retention purges
//! - **Report catalog** - [`ReportReason`] codes for user-submitted reports
//! - **Consent catalog** - [`ConsentType`] codes for recorded user consents
//!
//! Transitions never read the ambient clock: every operation takes `now`
//! explicitly, so the state machine is deterministic and testable.
//!
//! # Quick Start
//!
//! ```
//! use chrono::{Duration, Utc};
//! use ringline_core::Session;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let now = Utc::now();
//!     let mut session = Session::issue("sess-1", "room-1", Duration::seconds(60), now)?;
//!     session.join(now)?;
//!     session.leave(now)?;
//!     assert!(session.status().is_terminal());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod config;
pub mod consent;
pub mod error;
pub mod report;
pub mod session;

// Re-export key types for convenience
pub use config::{RinglineConfig, SessionPolicy};
pub use consent::ConsentType;
pub use error::{ConfigError, RinglineError, SessionError, UnknownCodeError};
pub use report::ReportReason;
pub use session::{
    Session, SessionEvent, SessionLifecycleManager, SessionManager, SessionStatus, SweepResult,
};
