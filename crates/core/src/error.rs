use crate::types::DbId;

/// Domain error taxonomy shared by the engine and the API layer.
///
/// Every business failure is one of these variants; the API layer maps them
/// onto HTTP statuses (404 / 400 / 409 / 401 / 403 / 500). None of them is
/// retried internally -- a duplicate-request conflict is a user-facing
/// outcome, not a transient fault.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The operation is not legal in the current state (illegal transition,
    /// self-swap, no-op status change).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The request collides with existing state (duplicate active request,
    /// room-ownership mismatch, room not available).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
