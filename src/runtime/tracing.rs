//! # Observability & Tracing
//!
//! Structured logging for the whole service via the `tracing` crate.
//!
//! Every client-facing operation carries an `#[instrument]` span, so a
//! request's path through orchestrator, store and gateways shows up as a
//! hierarchy. Operations log full payloads once at `debug` level
//! (`debug!(?payload, ...)`) and outcomes at `info`/`warn` with structured
//! fields (`order_id`, `user_id`, `reason`).
//!
//! ## Configuration
//!
//! Levels come from the `RUST_LOG` environment variable:
//!
//! ```bash
//! # Outcome-level logs
//! RUST_LOG=info cargo test
//!
//! # Full payloads and gateway outcome detail
//! RUST_LOG=debug cargo test
//!
//! # Filter to the orchestration layer only
//! RUST_LOG=order_service::service=debug cargo test
//! ```
//!
//! The fail-open and fail-soft policy decisions are deliberately logged at
//! `warn`: an unreachable identity registry during creation, or a degraded
//! enrichment section, should be visible in production logs even though the
//! request itself succeeds.

/// Initializes the global tracing subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Span names carry enough context without module paths.
        .compact()
        .init();
}
