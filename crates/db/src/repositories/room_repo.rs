//! Repository for the `rooms` table.

use sqlx::PgExecutor;

use domus_core::room::STATUS_AVAILABLE;
use domus_core::types::DbId;

use crate::models::room::{CreateRoom, Room, UpdateRoom};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, floor_id, number, status, occupant_id, created_at, updated_at";

/// Provides CRUD operations for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateRoom,
    ) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (floor_id, number, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(input.floor_id)
            .bind(input.number)
            .bind(input.status.as_deref().unwrap_or(STATUS_AVAILABLE))
            .fetch_one(exec)
            .await
    }

    /// Find a room by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// List all rooms on a floor ordered by door number.
    pub async fn list_by_floor(
        exec: impl PgExecutor<'_>,
        floor_id: DbId,
    ) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE floor_id = $1 ORDER BY number ASC");
        sqlx::query_as::<_, Room>(&query)
            .bind(floor_id)
            .fetch_all(exec)
            .await
    }

    /// List all rooms ordered by floor then door number.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY floor_id ASC, number ASC");
        sqlx::query_as::<_, Room>(&query).fetch_all(exec).await
    }

    /// Update a room's administrative fields. Only non-`None` fields apply.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET
                status = COALESCE($2, status),
                number = COALESCE($3, number),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.number)
            .fetch_optional(exec)
            .await
    }

    /// Write a room's occupant and status together. Used by the
    /// ownership-transfer side effect, always inside a transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_occupancy(
        exec: impl PgExecutor<'_>,
        id: DbId,
        occupant_id: Option<DbId>,
        status: &str,
    ) -> Result<Option<Room>, sqlx::Error> {
        let query = format!(
            "UPDATE rooms SET occupant_id = $2, status = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .bind(occupant_id)
            .bind(status)
            .fetch_optional(exec)
            .await
    }
}
