//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`ProdukError`]
//! via `From`. Adapters decide how each [`ErrorKind`] is rendered.

use std::error::Error as StdError;

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum ProdukError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),
}

impl ProdukError {
    /// Coarse classification used by driving adapters.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// Error classes exposed to callers, independent of any transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something that can never succeed as-is.
    BadRequest,
    /// The addressed record does not exist.
    NotFound,
    /// Storage failed; nothing the caller can fix.
    Internal,
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
}

/// Lookup miss for a record with the given identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
