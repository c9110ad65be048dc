//! Handlers for the `/graveyards` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gravekeeper_core::error::CoreError;
use gravekeeper_core::graveyard::{validate_graveyard_name, LAST_GRAVEYARD_MESSAGE};
use gravekeeper_core::theme::{graveyard_title, validate_theme_id, Theme};
use gravekeeper_core::types::DbId;
use gravekeeper_db::models::graveyard::{
    CreateGraveyard, Graveyard, GraveyardDeletion, UpdateGraveyard,
};
use gravekeeper_db::models::profile::Profile;
use gravekeeper_db::repositories::{GraveyardRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/graveyards
///
/// The caller's graveyards, newest first. A user without any graveyard gets
/// a default one, built from their profile, before the list is returned.
pub async fn list_graveyards(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Graveyard>>>> {
    let mut graveyards = GraveyardRepo::list_for_user(&state.pool, auth_user.user_id).await?;

    if graveyards.is_empty() {
        let profile = ProfileRepo::find_by_id(&state.pool, auth_user.user_id).await?;
        provision_default_graveyard(&state, auth_user.user_id, profile.as_ref()).await?;
        graveyards = GraveyardRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    }

    Ok(Json(DataResponse { data: graveyards }))
}

/// POST /api/v1/graveyards
///
/// Create an inactive graveyard. Returns 201.
pub async fn create_graveyard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateGraveyard>,
) -> AppResult<(StatusCode, Json<DataResponse<Graveyard>>)> {
    validate_graveyard_name(&input.name)?;
    validate_theme_id(&input.theme)?;
    input.name = input.name.trim().to_string();

    let graveyard = GraveyardRepo::create(&state.pool, auth_user.user_id, &input).await?;
    tracing::info!(graveyard_id = graveyard.id, user_id = auth_user.user_id, "Graveyard created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: graveyard })))
}

/// PUT /api/v1/graveyards/{id}
pub async fn update_graveyard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateGraveyard>,
) -> AppResult<Json<DataResponse<Graveyard>>> {
    if let Some(name) = &input.name {
        validate_graveyard_name(name)?;
    }
    if let Some(theme) = &input.theme {
        validate_theme_id(theme)?;
    }
    input.name = input.name.map(|name| name.trim().to_string());

    let graveyard = GraveyardRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Graveyard",
            id,
        }))?;

    Ok(Json(DataResponse { data: graveyard }))
}

/// POST /api/v1/graveyards/{id}/activate
///
/// Make this the caller's only active graveyard.
pub async fn activate_graveyard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Graveyard>>> {
    let graveyard = GraveyardRepo::set_active(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Graveyard",
            id,
        }))?;

    tracing::info!(graveyard_id = id, user_id = auth_user.user_id, "Graveyard activated");
    Ok(Json(DataResponse { data: graveyard }))
}

/// DELETE /api/v1/graveyards/{id}
///
/// Deletes the graveyard and its memorials. The caller's last graveyard is
/// kept and answered with 409.
pub async fn delete_graveyard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    match GraveyardRepo::delete_unless_last(&state.pool, id, auth_user.user_id).await? {
        GraveyardDeletion::Deleted => {
            tracing::info!(graveyard_id = id, user_id = auth_user.user_id, "Graveyard deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        GraveyardDeletion::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Graveyard",
            id,
        })),
        GraveyardDeletion::LastRemaining => Err(AppError::Core(CoreError::Conflict(
            LAST_GRAVEYARD_MESSAGE.into(),
        ))),
    }
}

/// Create the user's first graveyard from their profile choices.
///
/// Uses the profile theme (Stillwater when unset) and the profile name
/// (the theme's display name when unset). Returns `None` when the user
/// already has a graveyard.
pub(crate) async fn provision_default_graveyard(
    state: &AppState,
    user_id: DbId,
    profile: Option<&Profile>,
) -> AppResult<Option<Graveyard>> {
    let theme = Theme::resolve(profile.and_then(|p| p.graveyard_theme.as_deref()));
    let name = graveyard_title(
        profile.and_then(|p| p.graveyard_name.as_deref()),
        Some(theme.id()),
    );

    let created = GraveyardRepo::create_default(&state.pool, user_id, &name, theme.id()).await?;
    if let Some(graveyard) = &created {
        tracing::info!(
            graveyard_id = graveyard.id,
            user_id,
            theme = theme.id(),
            "Default graveyard provisioned"
        );
    }
    Ok(created)
}
