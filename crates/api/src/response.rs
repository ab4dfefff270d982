//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope; paged list endpoints
//! return `domus_core::pagination::Page` directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Wraps any serializable payload in the project's standard response format.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: request }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
