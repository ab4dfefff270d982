//! Room-request endpoints.
//!
//! Creation and status updates run through the workflow engine inside a
//! single database transaction; reads go straight to the repository.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use domus_core::error::CoreError;
use domus_core::pagination::Page;
use domus_core::request::RequestStatus;
use domus_core::types::DbId;
use domus_db::models::request::{CreateRequestBody, NewRoomRequest, RoomRequest, UpdateRequestBody};
use domus_db::repositories::RequestRepo;

use crate::engine::{self, pg::PgUnitOfWork};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// `POST /requests` -- file a new room request.
///
/// The whole operation (permission checks, room consistency checks, the
/// active-request exclusivity check, the insert) runs in one transaction.
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateRequestBody>,
) -> AppResult<(StatusCode, Json<DataResponse<RoomRequest>>)> {
    let input = NewRoomRequest {
        requester_id: body.requester_id,
        requester_room_id: body.requester_room_id,
        counterpart_id: body.counterpart_id,
        counterpart_room_id: body.counterpart_room_id,
    };

    let mut tx = state.pool.begin().await?;
    let request = {
        let mut uow = PgUnitOfWork::new(&mut *tx);
        engine::create_request(&mut uow, &user.into(), &input).await?
    };
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// `PUT /requests/{id}` -- move a request to a new status.
///
/// An `APPROVED` target additionally executes the room-ownership transfer;
/// the transfer and the status write share the transaction, so either both
/// persist or neither does.
pub async fn update_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRequestBody>,
) -> AppResult<Json<DataResponse<RoomRequest>>> {
    let target: RequestStatus = body.target_status.parse::<RequestStatus>()?;

    let mut tx = state.pool.begin().await?;
    let request = {
        let mut uow = PgUnitOfWork::new(&mut *tx);
        engine::transition_request(&mut uow, &user.into(), id, target, body.reason).await?
    };
    tx.commit().await?;

    Ok(Json(DataResponse { data: request }))
}

/// `GET /requests` -- paged request listing.
pub async fn list_requests(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Page<RoomRequest>>> {
    let page = params.normalize();

    let content =
        RequestRepo::find_page(&state.pool, &page.order_by(), page.size, page.offset()).await?;
    let total = RequestRepo::count_all(&state.pool).await?;

    Ok(Json(Page::new(content, &page, total)))
}

/// `GET /requests/{id}` -- fetch a single request.
pub async fn get_request(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoomRequest>>> {
    let request = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "RoomRequest",
            id,
        })?;

    Ok(Json(DataResponse { data: request }))
}
