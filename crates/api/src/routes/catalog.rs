use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog` (public).
///
/// ```text
/// GET /themes            -> list_themes
/// GET /tombstone-styles  -> list_tombstone_styles
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/themes", get(catalog::list_themes))
        .route("/tombstone-styles", get(catalog::list_tombstone_styles))
}
