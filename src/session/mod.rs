//! Session management.
//!
//! # State Machine
//! ```text
//! unauthenticated ──init_session()──▶ (connecting) ──login / register──▶ authenticated
//!        ▲                                  │                                  │
//!        └──── wallet missing / failure ────┘          re-init replaces ───────┘
//! ```
//!
//! "connecting" is never published: consumers see either no session or a
//! fully authenticated one.

pub mod context;
pub mod manager;
pub mod state;

pub use context::SessionContext;
pub use manager::{SessionError, SessionManager};
pub use state::{ActiveSession, InitPath, SessionId};
