//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; level comes from config or the
//!   `RUST_LOG` environment variable
//! - Metrics are cheap (atomic increments) and exposed on a separate
//!   Prometheus scrape address

pub mod metrics;
