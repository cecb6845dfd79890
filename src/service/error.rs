//! Error taxonomy for the orchestration layer.

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the order and order-item services.
///
/// Gateway transport failures never appear here: the creation path resolves
/// them by failing open and the enrichment path by substituting placeholder
/// payloads. What does surface is the taxonomy a boundary can map onto
/// client/server error classes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// Malformed or semantically invalid input; nothing was applied.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced aggregate does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The persistence collaborator failed. Fatal for the request, no retry.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Anything uncategorized, reported by message only.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}
