//! Route definitions for the `/graveyards` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{graveyard, scene};
use crate::state::AppState;

/// Routes mounted at `/graveyards`.
///
/// ```text
/// GET    /                -> list_graveyards
/// POST   /                -> create_graveyard
/// PUT    /{id}            -> update_graveyard
/// DELETE /{id}            -> delete_graveyard
/// POST   /{id}/activate   -> activate_graveyard
/// GET    /{id}/scene      -> get_scene
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(graveyard::list_graveyards).post(graveyard::create_graveyard),
        )
        .route(
            "/{id}",
            put(graveyard::update_graveyard).delete(graveyard::delete_graveyard),
        )
        .route("/{id}/activate", post(graveyard::activate_graveyard))
        .route("/{id}/scene", get(scene::get_scene))
}
