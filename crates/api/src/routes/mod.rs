//! Route definitions, grouped by resource and mounted under `/api/v1`.
//!
//! Route map:
//!
//! ```text
//! GET  /health                      liveness + database reachability
//!
//! POST /api/v1/auth/register        create a resident account
//! POST /api/v1/auth/login           exchange credentials for a token
//! GET  /api/v1/auth/me              the caller's own profile
//!
//! GET    /api/v1/users              list users               (admin)
//! POST   /api/v1/users              create a user            (admin)
//! GET    /api/v1/users/{id}         fetch a user             (admin)
//! PUT    /api/v1/users/{id}         update a user            (admin)
//! DELETE /api/v1/users/{id}         deactivate a user        (admin)
//!
//! GET    /api/v1/floors             list floors
//! POST   /api/v1/floors             create a floor           (admin)
//! GET    /api/v1/floors/{id}        fetch a floor
//! PUT    /api/v1/floors/{id}        update a floor           (admin)
//! DELETE /api/v1/floors/{id}        delete a floor           (admin)
//!
//! GET  /api/v1/rooms                list rooms (?floor_id=)
//! POST /api/v1/rooms                create a room            (admin/floor manager)
//! GET  /api/v1/rooms/{id}           fetch a room
//! PUT  /api/v1/rooms/{id}           update a room            (admin/floor manager)
//!
//! POST /api/v1/requests             file a room request
//! GET  /api/v1/requests             paged request listing
//! GET  /api/v1/requests/{id}        fetch a request
//! PUT  /api/v1/requests/{id}        transition a request
//! ```

pub mod auth;
pub mod floors;
pub mod health;
pub mod requests;
pub mod rooms;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All versioned API routes, to be nested under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/users", users::routes())
        .nest("/floors", floors::routes())
        .nest("/rooms", rooms::routes())
        .nest("/requests", requests::routes())
}
