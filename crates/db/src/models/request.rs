//! Room-request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use domus_core::types::{DbId, Timestamp};

/// A row from the `room_requests` table.
///
/// `requester_room_id` is null for join requests (the requester holds no
/// room yet); `counterpart_id` is null when the target room is unowned.
/// `counterpart_room_id` is always set -- it is the room being requested.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub requester_room_id: Option<DbId>,
    pub counterpart_id: Option<DbId>,
    pub counterpart_room_id: DbId,
    /// Who resolved the request; null until an authority acts on it.
    pub approver_id: Option<DbId>,
    /// One of the `domus_core::request::RequestStatus` string forms.
    pub status: String,
    pub closed_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new request. Status is always `PENDING` at insert.
#[derive(Debug, Clone)]
pub struct NewRoomRequest {
    pub requester_id: DbId,
    pub requester_room_id: Option<DbId>,
    pub counterpart_id: Option<DbId>,
    pub counterpart_room_id: DbId,
}

/// Which side of a request a participant occupies, for the active-request
/// existence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Requester,
    Counterpart,
}

impl Participant {
    /// The column holding this participant's user id.
    pub const fn column(self) -> &'static str {
        match self {
            Participant::Requester => "requester_id",
            Participant::Counterpart => "counterpart_id",
        }
    }
}

/// Request body for `POST /requests`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    pub requester_id: DbId,
    pub requester_room_id: Option<DbId>,
    pub counterpart_id: Option<DbId>,
    pub counterpart_room_id: DbId,
}

/// Request body for `PUT /requests/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestBody {
    pub target_status: String,
    pub reason: Option<String>,
}
