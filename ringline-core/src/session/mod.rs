//! Session lifecycle management

pub mod lifecycle;
pub mod manager;
pub mod state;

// Re-export key types for convenience
pub use lifecycle::{SessionLifecycleManager, SweepResult};
pub use manager::SessionManager;
pub use state::{Session, SessionEvent, SessionStatus, transition};
