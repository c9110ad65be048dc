//! Handlers for the `/deceased` resource (memorial records).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use gravekeeper_core::error::CoreError;
use gravekeeper_core::memorial::{
    normalize_optional_text, random_position, validate_memorial, validate_new_memorial,
};
use gravekeeper_core::tombstone::{render_detail, MemorialDetail};
use gravekeeper_core::types::DbId;
use gravekeeper_db::models::deceased::{CreateDeceased, Deceased, UpdateDeceased};
use gravekeeper_db::repositories::{DeceasedRepo, GraveyardRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /deceased`.
#[derive(Debug, Deserialize)]
pub struct ListDeceasedParams {
    pub graveyard_id: Option<DbId>,
}

/// The detail dialog for one memorial.
#[derive(Debug, Serialize)]
pub struct DeceasedDetail {
    pub id: DbId,
    pub graveyard_id: DbId,
    #[serde(flatten)]
    pub detail: MemorialDetail,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Deceased",
        id,
    })
}

/// GET /api/v1/deceased?graveyard_id=N
///
/// The caller's memorials, newest first.
pub async fn list_deceased(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListDeceasedParams>,
) -> AppResult<Json<DataResponse<Vec<Deceased>>>> {
    let rows =
        DeceasedRepo::list_for_user(&state.pool, auth_user.user_id, params.graveyard_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/deceased
///
/// Create a memorial in one of the caller's graveyards. Missing coordinates
/// are picked at random. Returns 201.
pub async fn create_deceased(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(mut input): Json<CreateDeceased>,
) -> AppResult<(StatusCode, Json<DataResponse<Deceased>>)> {
    input.notes = normalize_optional_text(input.notes.take());
    validate_new_memorial(&input.fields())?;

    GraveyardRepo::find_for_user(&state.pool, input.graveyard_id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Graveyard",
            id: input.graveyard_id,
        }))?;

    let (random_x, random_y) = random_position();
    let position = (
        input.position_x.unwrap_or(random_x),
        input.position_y.unwrap_or(random_y),
    );

    let row = DeceasedRepo::create(&state.pool, auth_user.user_id, &input, position).await?;
    tracing::info!(
        deceased_id = row.id,
        graveyard_id = row.graveyard_id,
        user_id = auth_user.user_id,
        "Memorial created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// GET /api/v1/deceased/{id}
pub async fn get_deceased(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Deceased>>> {
    let row = DeceasedRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/deceased/{id}/detail
///
/// Full dates and notes, as shown in the memorial dialog.
pub async fn get_deceased_detail(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeceasedDetail>>> {
    let row = DeceasedRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let detail = render_detail(
        row.tombstone_style,
        &row.name,
        row.birth_date,
        row.death_date,
        &row.epitaph,
        row.notes.as_deref(),
    );

    Ok(Json(DataResponse {
        data: DeceasedDetail {
            id: row.id,
            graveyard_id: row.graveyard_id,
            detail,
        },
    }))
}

/// PUT /api/v1/deceased/{id}
///
/// Partial update; `updated_at` is always refreshed.
pub async fn update_deceased(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateDeceased>,
) -> AppResult<Json<DataResponse<Deceased>>> {
    input.notes = input.notes.take().map(normalize_optional_text);
    validate_memorial(&input.fields())?;

    let row = DeceasedRepo::update(&state.pool, id, auth_user.user_id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/deceased/{id}
pub async fn delete_deceased(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DeceasedRepo::delete(&state.pool, id, auth_user.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(deceased_id = id, user_id = auth_user.user_id, "Memorial deleted");
    Ok(StatusCode::NO_CONTENT)
}
