//! Room endpoints. Reads are open to any authenticated user; writes require
//! admin or the manager of the room's floor.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use domus_core::error::CoreError;
use domus_core::room::validate_status;
use domus_core::types::DbId;
use domus_db::models::room::{CreateRoom, Room, UpdateRoom};
use domus_db::repositories::{FloorRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::query::RoomFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /rooms` -- list rooms, optionally filtered by `?floor_id=`.
pub async fn list_rooms(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<RoomFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    let data = match params.floor_id {
        Some(floor_id) => RoomRepo::list_by_floor(&state.pool, floor_id).await?,
        None => RoomRepo::list(&state.pool).await?,
    };
    Ok(Json(DataResponse { data }))
}

/// `GET /rooms/{id}` -- fetch a single room.
pub async fn get_room(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Room>>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Room", id })?;
    Ok(Json(DataResponse { data: room }))
}

/// `POST /rooms` -- create a room on a floor.
pub async fn create_room(
    State(state): State<AppState>,
    RequireManager(actor): RequireManager,
    Json(body): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<DataResponse<Room>>)> {
    if let Some(status) = &body.status {
        validate_status(status).map_err(AppError::BadRequest)?;
    }
    ensure_manages_floor(&state, &actor, body.floor_id).await?;

    let room = RoomRepo::create(&state.pool, &body).await?;
    tracing::info!(room_id = room.id, floor_id = room.floor_id, "Room created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// `PUT /rooms/{id}` -- update a room's number or administrative status.
///
/// Occupancy is never written here; it only changes through an approved
/// request.
pub async fn update_room(
    State(state): State<AppState>,
    RequireManager(actor): RequireManager,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRoom>,
) -> AppResult<Json<DataResponse<Room>>> {
    if let Some(status) = &body.status {
        validate_status(status).map_err(AppError::BadRequest)?;
    }

    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Room", id })?;
    ensure_manages_floor(&state, &actor, room.floor_id).await?;

    let room = RoomRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(CoreError::NotFound { entity: "Room", id })?;
    Ok(Json(DataResponse { data: room }))
}

/// Admins may touch any floor; a manager only the floor assigned to them.
async fn ensure_manages_floor(
    state: &AppState,
    actor: &AuthUser,
    floor_id: DbId,
) -> AppResult<()> {
    if actor.role == domus_core::roles::ROLE_ADMIN {
        return Ok(());
    }

    let floor = FloorRepo::find_by_id(&state.pool, floor_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Floor",
            id: floor_id,
        })?;

    if floor.manager_id != Some(actor.user_id) {
        return Err(CoreError::Forbidden("Not the manager of this floor".into()).into());
    }
    Ok(())
}
