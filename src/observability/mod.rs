//! Observability subsystem.
//!
//! Structured logs only, via `tracing`. Secrets never appear in log fields.

pub mod logging;
