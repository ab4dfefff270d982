//! Room routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/{id}", get(rooms::get_room).put(rooms::update_room))
}
