//! Handler for the graveyard scene view.
//!
//! Joins a graveyard, its memorials and the pure layout/rendering rules from
//! `gravekeeper_core` into one view model the frontend draws as-is.

use axum::extract::{Path, Query, State};
use axum::Json;
use gravekeeper_core::error::CoreError;
use gravekeeper_core::scene::{
    layout_scene, soul_count_caption, ScenePage, Viewport, EMPTY_SCENE_HINT, EMPTY_SCENE_MESSAGE,
};
use gravekeeper_core::theme::{graveyard_title, Theme, ThemeInfo};
use gravekeeper_core::tombstone::{render_tombstone, TombstoneView};
use gravekeeper_core::types::DbId;
use gravekeeper_db::repositories::{DeceasedRepo, GraveyardRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /graveyards/{id}/scene`.
#[derive(Debug, Default, Deserialize)]
pub struct SceneParams {
    #[serde(default)]
    pub viewport: Viewport,
    /// Zero-based scene index; out-of-range values show the last scene.
    #[serde(default)]
    pub page: usize,
}

/// One clickable stone.
#[derive(Debug, Serialize)]
pub struct SceneStone {
    pub id: DbId,
    /// Freeform coordinates, used by grid themes that scatter stones.
    pub position_x: i32,
    pub position_y: i32,
    pub tombstone: TombstoneView,
}

#[derive(Debug, Serialize)]
pub struct EmptyState {
    pub message: &'static str,
    pub hint: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SceneView {
    pub graveyard_id: DbId,
    pub title: String,
    pub theme: ThemeInfo,
    pub caption: String,
    pub empty_state: Option<EmptyState>,
    pub scene: ScenePage<SceneStone>,
}

/// GET /api/v1/graveyards/{id}/scene?viewport=desktop|narrow&page=N
pub async fn get_scene(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<SceneParams>,
) -> AppResult<Json<DataResponse<SceneView>>> {
    let graveyard = GraveyardRepo::find_for_user(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Graveyard",
            id,
        }))?;
    let memorials = DeceasedRepo::list_for_user(&state.pool, auth_user.user_id, Some(id)).await?;

    let theme = Theme::resolve(Some(&graveyard.theme));
    let count = memorials.len();

    let stones: Vec<SceneStone> = memorials
        .into_iter()
        .map(|m| SceneStone {
            id: m.id,
            position_x: m.position_x,
            position_y: m.position_y,
            tombstone: render_tombstone(
                m.tombstone_style,
                &m.name,
                m.birth_date,
                m.death_date,
                &m.epitaph,
            ),
        })
        .collect();

    let view = SceneView {
        graveyard_id: graveyard.id,
        title: graveyard_title(Some(&graveyard.name), Some(&graveyard.theme)),
        theme: ThemeInfo::from(theme),
        caption: soul_count_caption(count),
        empty_state: (count == 0).then_some(EmptyState {
            message: EMPTY_SCENE_MESSAGE,
            hint: EMPTY_SCENE_HINT,
        }),
        scene: layout_scene(theme, params.viewport, stones, params.page),
    };

    Ok(Json(DataResponse { data: view }))
}
