//! Floor endpoints. Reads are open to any authenticated user; writes are
//! admin-only (floor layout and manager assignment are building policy).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use domus_core::error::CoreError;
use domus_core::types::DbId;
use domus_db::models::floor::{CreateFloor, Floor, UpdateFloor};
use domus_db::repositories::FloorRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// `GET /floors` -- list floors ordered by level.
pub async fn list_floors(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Floor>>>> {
    let data = FloorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// `GET /floors/{id}` -- fetch a single floor.
pub async fn get_floor(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Floor>>> {
    let floor = FloorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Floor", id })?;
    Ok(Json(DataResponse { data: floor }))
}

/// `POST /floors` -- create a floor.
pub async fn create_floor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateFloor>,
) -> AppResult<(StatusCode, Json<DataResponse<Floor>>)> {
    let floor = FloorRepo::create(&state.pool, &body).await?;
    tracing::info!(floor_id = floor.id, level = floor.level, "Floor created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: floor })))
}

/// `PUT /floors/{id}` -- rename a floor or reassign its manager.
pub async fn update_floor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateFloor>,
) -> AppResult<Json<DataResponse<Floor>>> {
    let floor = FloorRepo::update(&state.pool, id, &body)
        .await?
        .ok_or(CoreError::NotFound { entity: "Floor", id })?;
    Ok(Json(DataResponse { data: floor }))
}

/// `DELETE /floors/{id}` -- remove a floor.
///
/// Fails with 500 from the database if rooms still reference it; the
/// foreign key is intentionally RESTRICT.
pub async fn delete_floor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FloorRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "Floor", id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
