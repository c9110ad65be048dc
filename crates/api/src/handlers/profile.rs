//! Handlers for the `/profile` resource.

use axum::extract::State;
use axum::Json;
use gravekeeper_core::error::CoreError;
use gravekeeper_core::graveyard::MAX_GRAVEYARD_NAME_CHARS;
use gravekeeper_core::memorial::{normalize_optional_text, validate_max};
use gravekeeper_core::theme::validate_theme_id;
use gravekeeper_db::models::profile::{Profile, UpdateProfile};
use gravekeeper_db::repositories::{GraveyardRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::graveyard::provision_default_graveyard;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth_user.user_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
///
/// Partial update, creating the profile if it is missing. This is the
/// onboarding "customize" step: a user who has no graveyard yet gets their
/// default graveyard built from the new name and theme.
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let graveyard_name =
        normalize_optional_text(input.graveyard_name).map(|name| name.trim().to_string());
    if let Some(name) = &graveyard_name {
        validate_max("Graveyard name", name, MAX_GRAVEYARD_NAME_CHARS)?;
    }
    if let Some(theme) = &input.graveyard_theme {
        validate_theme_id(theme)?;
    }
    let input = UpdateProfile {
        graveyard_name,
        graveyard_theme: input.graveyard_theme,
    };

    let profile =
        ProfileRepo::upsert(&state.pool, auth_user.user_id, &auth_user.email, &input).await?;

    if GraveyardRepo::count_for_user(&state.pool, auth_user.user_id).await? == 0 {
        provision_default_graveyard(&state, auth_user.user_id, Some(&profile)).await?;
    }

    Ok(Json(DataResponse { data: profile }))
}
