//! Repository for the `floors` table.

use sqlx::PgExecutor;

use domus_core::types::DbId;

use crate::models::floor::{CreateFloor, Floor, UpdateFloor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, level, name, manager_id, created_at, updated_at";

/// Provides CRUD operations for floors.
pub struct FloorRepo;

impl FloorRepo {
    /// Insert a new floor, returning the created row.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateFloor,
    ) -> Result<Floor, sqlx::Error> {
        let query = format!(
            "INSERT INTO floors (level, name, manager_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Floor>(&query)
            .bind(input.level)
            .bind(&input.name)
            .bind(input.manager_id)
            .fetch_one(exec)
            .await
    }

    /// Find a floor by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Floor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM floors WHERE id = $1");
        sqlx::query_as::<_, Floor>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// List all floors ordered by level ascending.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<Floor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM floors ORDER BY level ASC");
        sqlx::query_as::<_, Floor>(&query).fetch_all(exec).await
    }

    /// Update a floor. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateFloor,
    ) -> Result<Option<Floor>, sqlx::Error> {
        let query = format!(
            "UPDATE floors SET
                name = COALESCE($2, name),
                manager_id = COALESCE($3, manager_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Floor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.manager_id)
            .fetch_optional(exec)
            .await
    }

    /// Delete a floor. Returns `true` if a row was removed.
    pub async fn delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM floors WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
