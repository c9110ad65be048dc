use axum::routing::delete;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// DELETE /  -> delete_own_account (requires auth + typed confirmation)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", delete(account::delete_own_account))
}
