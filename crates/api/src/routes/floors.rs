//! Floor routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::floors;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(floors::list_floors).post(floors::create_floor))
        .route(
            "/{id}",
            get(floors::get_floor)
                .put(floors::update_floor)
                .delete(floors::delete_floor),
        )
}
