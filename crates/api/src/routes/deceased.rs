//! Route definitions for the `/deceased` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::deceased;
use crate::state::AppState;

/// Routes mounted at `/deceased`.
///
/// ```text
/// GET    /              -> list_deceased
/// POST   /              -> create_deceased
/// GET    /{id}          -> get_deceased
/// PUT    /{id}          -> update_deceased
/// DELETE /{id}          -> delete_deceased
/// GET    /{id}/detail   -> get_deceased_detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(deceased::list_deceased).post(deceased::create_deceased),
        )
        .route(
            "/{id}",
            get(deceased::get_deceased)
                .put(deceased::update_deceased)
                .delete(deceased::delete_deceased),
        )
        .route("/{id}/detail", get(deceased::get_deceased_detail))
}
