//! Floor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use domus_core::types::{DbId, Timestamp};

/// A floor row from the `floors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Floor {
    pub id: DbId,
    /// Physical level number, unique per building.
    pub level: i32,
    pub name: String,
    /// The manager-role user responsible for this floor, if assigned.
    pub manager_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new floor.
#[derive(Debug, Deserialize)]
pub struct CreateFloor {
    pub level: i32,
    pub name: String,
    pub manager_id: Option<DbId>,
}

/// DTO for updating an existing floor. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateFloor {
    pub name: Option<String>,
    pub manager_id: Option<DbId>,
}
