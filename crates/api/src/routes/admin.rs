use axum::routing::post;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/admin` (service role only).
///
/// ```text
/// POST /accounts/delete  -> delete_account_as_service
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/accounts/delete", post(account::delete_account_as_service))
}
