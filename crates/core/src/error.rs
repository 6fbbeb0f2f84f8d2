//! Domain-level error type shared by all crates.

/// Errors produced by domain logic and surfaced through the API layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed domain validation.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state (duplicate unlock,
    /// insufficient balance, already-used referral, ...).
    #[error("{0}")]
    Conflict(String),

    /// An invariant was violated or an unexpected internal failure occurred.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
