//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! command proxy + HTTP handlers produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG / config)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) is attached to every HTTP trace span
//! - Metrics are cheap and no-ops without an installed exporter

pub mod logging;
pub mod metrics;
