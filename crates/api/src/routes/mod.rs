pub mod account;
pub mod admin;
pub mod auth;
pub mod catalog;
pub mod deceased;
pub mod graveyard;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                         sign up (public)
/// /auth/login                          sign in (public)
/// /auth/refresh                        rotate tokens (public)
/// /auth/logout                         sign out (requires auth)
/// /auth/me                             current identity + profile
///
/// /profile                             get, update
///
/// /graveyards                          list, create
/// /graveyards/{id}                     update, delete
/// /graveyards/{id}/activate            make active (POST)
/// /graveyards/{id}/scene               scene view model
///
/// /deceased                            list (?graveyard_id), create
/// /deceased/{id}                       get, update, delete
/// /deceased/{id}/detail                detail dialog view model
///
/// /catalog/themes                      theme catalog (public)
/// /catalog/tombstone-styles            style picker (public)
///
/// /account                             delete own account (DELETE)
/// /admin/accounts/delete               delete any account (service role)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/graveyards", graveyard::router())
        .nest("/deceased", deceased::router())
        .nest("/catalog", catalog::router())
        .nest("/account", account::router())
        .nest("/admin", admin::router())
}
