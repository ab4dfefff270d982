//! Room entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use domus_core::types::{DbId, Timestamp};

/// A room row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub floor_id: DbId,
    /// Door number, unique per floor.
    pub number: i32,
    /// One of the `domus_core::room` status constants.
    pub status: String,
    pub occupant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new room.
#[derive(Debug, Deserialize)]
pub struct CreateRoom {
    pub floor_id: DbId,
    pub number: i32,
    /// Defaults to `AVAILABLE` when omitted.
    pub status: Option<String>,
}

/// DTO for updating a room's administrative status.
#[derive(Debug, Deserialize)]
pub struct UpdateRoom {
    pub status: Option<String>,
    pub number: Option<i32>,
}
