//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use domus_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    /// Floor the user currently lives on; follows their room on approval.
    pub current_floor_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// Resolved role name (e.g. `"admin"`, `"resident"`).
    pub role: String,
    pub is_active: bool,
    pub current_floor_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build a response from a user row and its resolved role name.
    pub fn from_user(user: User, role: String) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            is_active: user.is_active,
            current_floor_id: user.current_floor_id,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}
