//! Account deletion: the user-facing endpoint and the service-role endpoint.
//!
//! Both run the same sequential cascade with the server's own database
//! credentials; see [`AccountRepo::delete_account`].

use axum::extract::State;
use axum::Json;
use gravekeeper_core::confirmation::verify_account_deletion;
use gravekeeper_core::types::DbId;
use gravekeeper_db::repositories::{AccountDeletionReport, AccountRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::service::RequireServiceRole;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `DELETE /account`.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    /// Must be exactly `DELETE`.
    pub confirmation: String,
}

/// Request body for `POST /admin/accounts/delete`.
#[derive(Debug, Deserialize)]
pub struct ServiceDeleteRequest {
    pub user_id: DbId,
}

/// DELETE /api/v1/account
///
/// Permanently delete the caller's account after the typed confirmation.
pub async fn delete_own_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<DeleteAccountRequest>,
) -> AppResult<Json<DataResponse<AccountDeletionReport>>> {
    verify_account_deletion(&input.confirmation)?;

    tracing::info!(user_id = auth_user.user_id, "Account deletion requested");
    let report = AccountRepo::delete_account(&state.pool, auth_user.user_id).await?;

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/admin/accounts/delete
///
/// Privileged deletion of any account. Requires the service-role key.
pub async fn delete_account_as_service(
    State(state): State<AppState>,
    _service: RequireServiceRole,
    Json(input): Json<ServiceDeleteRequest>,
) -> AppResult<Json<DataResponse<AccountDeletionReport>>> {
    tracing::info!(user_id = input.user_id, "Service-role account deletion");
    let report = AccountRepo::delete_account(&state.pool, input.user_id).await?;

    Ok(Json(DataResponse { data: report }))
}
