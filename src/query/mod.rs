//! Reactive query execution against the live session.
//!
//! # Data Flow
//! ```text
//! SessionContext ──session changes──┐
//! Query::set_args / set_name ───────┼─▶ watcher ─▶ change detection
//!                                   │               (session id, name, canonical args)
//! Query::reload ────────────────────┘                      │
//!                                                          ▼
//!                                   Session::query ─▶ sequence guard ─▶ QueryResult
//! ```

pub mod args;
pub mod executor;

pub use args::QueryArgs;
pub use executor::{Query, QueryError, QueryResult};
