//! Persistence layer error types

use thiserror::Error;
use uuid::Uuid;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A backend that enforces referential integrity may report a missing
    /// row on update; the in-memory backend signals absence through
    /// `Option`/`bool` returns instead.
    #[error("entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
