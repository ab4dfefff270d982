//! Repository for the `room_requests` table.

use sqlx::PgExecutor;

use domus_core::request::RequestStatus;
use domus_core::types::DbId;

use crate::models::request::{NewRoomRequest, Participant, RoomRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requester_id, requester_room_id, counterpart_id, \
    counterpart_room_id, approver_id, status, closed_reason, created_at, updated_at";

/// SQL literal list of the active statuses (`'PENDING','ACCEPTED'`).
const ACTIVE_STATUS_LIST: &str = "'PENDING','ACCEPTED'";

/// Provides persistence for room requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new request in `PENDING`, returning the created row.
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        input: &NewRoomRequest,
    ) -> Result<RoomRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO room_requests
                (requester_id, requester_room_id, counterpart_id, counterpart_room_id, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoomRequest>(&query)
            .bind(input.requester_id)
            .bind(input.requester_room_id)
            .bind(input.counterpart_id)
            .bind(input.counterpart_room_id)
            .bind(RequestStatus::Pending.as_str())
            .fetch_one(exec)
            .await
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<RoomRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM room_requests WHERE id = $1");
        sqlx::query_as::<_, RoomRequest>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Persist a mutated request (status, approver, closed reason).
    ///
    /// Returns `None` if no row with the request's `id` exists.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        request: &RoomRequest,
    ) -> Result<Option<RoomRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE room_requests SET
                status = $2,
                approver_id = $3,
                closed_reason = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoomRequest>(&query)
            .bind(request.id)
            .bind(&request.status)
            .bind(request.approver_id)
            .bind(&request.closed_reason)
            .fetch_optional(exec)
            .await
    }

    /// Whether an active (`PENDING`/`ACCEPTED`) request exists with the
    /// given user on the given side.
    pub async fn exists_active(
        exec: impl PgExecutor<'_>,
        participant_id: DbId,
        side: Participant,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(
                SELECT 1 FROM room_requests
                WHERE {} = $1 AND status IN ({ACTIVE_STATUS_LIST})
             )",
            side.column()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(participant_id)
            .fetch_one(exec)
            .await
    }

    /// Fetch one page of requests.
    ///
    /// `order_by` must come from `PageRequest::order_by()` -- it is built
    /// from whitelisted column names only and is interpolated, not bound.
    pub async fn find_page(
        exec: impl PgExecutor<'_>,
        order_by: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RoomRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM room_requests ORDER BY {order_by} LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, RoomRequest>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(exec)
            .await
    }

    /// Total number of requests.
    pub async fn count_all(exec: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room_requests")
            .fetch_one(exec)
            .await
    }
}
