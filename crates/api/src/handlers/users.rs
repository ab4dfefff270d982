//! Admin user-management endpoints.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use domus_core::error::CoreError;
use domus_core::types::DbId;
use domus_db::models::user::{CreateUser, UpdateUser, UserResponse};
use domus_db::repositories::{RoleRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserBody {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub password: String,
    /// Role name (`admin`, `manager`, or `resident`).
    pub role: String,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Role name; resolved against the `roles` table when present.
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// `GET /users` -- list all users.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let role_names: HashMap<DbId, String> = RoleRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();

    let data = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|user| {
            let role = role_names
                .get(&user.role_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            UserResponse::from_user(user, role)
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// `POST /users` -- create a user with an explicit role.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<CreateUserBody>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_password_strength(&body.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let role = RoleRepo::find_by_name(&state.pool, &body.role)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {}", body.role)))?;

    if UserRepo::find_by_username(&state.pool, &body.username)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Username is already taken".into()).into());
    }
    if UserRepo::find_by_email(&state.pool, &body.email)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict("Email is already registered".into()).into());
    }

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: body.username,
            email: body.email,
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %role.name, "User created by admin");

    let data = UserResponse::from_user(user, role.name);
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// `GET /users/{id}` -- fetch a single user.
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, role),
    }))
}

/// `PUT /users/{id}` -- update a user's profile, role, or active flag.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateUserBody>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let role_id = match &body.role {
        Some(name) => Some(
            RoleRepo::find_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Unknown role: {name}")))?
                .id,
        ),
        None => None,
    };

    let input = UpdateUser {
        username: body.username,
        email: body.email,
        role_id,
        is_active: body.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, role),
    }))
}

/// `DELETE /users/{id}` -- soft-deactivate a user.
///
/// Rows are never removed; `is_active` is flipped to `false` so history
/// (requests, approvals) keeps its references.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(CoreError::NotFound { entity: "User", id }.into());
    }

    tracing::info!(user_id = id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}
