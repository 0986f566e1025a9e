//! # Service Error Types
//!
//! Unified error handling for the registry layer.
//!
//! The taxonomy distinguishes "absent" from "exists but in the wrong state"
//! even though an embedding request layer is expected to map both to its
//! single not-found response (see [`ServiceError::is_not_found`]). Lookups
//! and deletes never error on absence; they return `Ok(None)` / `Ok(false)`.

use thiserror::Error;
use uuid::Uuid;

use wildfire_domain::DomainError;
use wildfire_persistence::StoreError;

/// Registry-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("combat action {0} is already concluded")]
    ActionConcluded(Uuid),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Whether an embedding layer should surface this as a not-found
    /// response. Covers both genuine absence and the wrong-state cases
    /// that callers are not expected to distinguish from it.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::ActionConcluded(_))
    }
}

/// Result type alias for registry operations
pub type ServiceResult<T> = Result<T, ServiceError>;
