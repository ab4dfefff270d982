//! Room-request routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route(
            "/{id}",
            get(requests::get_request).put(requests::update_request),
        )
}
