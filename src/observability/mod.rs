//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! session + query subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters via the `metrics` facade)
//!
//! Consumers:
//!     → whatever subscriber / recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a metrics exporter
//! - Logging init is optional and idempotent

pub mod logging;
pub mod metrics;
