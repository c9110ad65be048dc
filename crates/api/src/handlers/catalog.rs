//! Public catalog endpoints: the fixed theme and tombstone-style sets.

use axum::extract::Query;
use axum::Json;
use gravekeeper_core::theme::{catalog, ThemeInfo};
use gravekeeper_core::tombstone::{style_picker, StyleOption, DEFAULT_STYLE};
use serde::Deserialize;

use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct StylePickerParams {
    pub selected: Option<i32>,
}

/// GET /api/v1/catalog/themes
pub async fn list_themes() -> Json<DataResponse<Vec<ThemeInfo>>> {
    Json(DataResponse { data: catalog() })
}

/// GET /api/v1/catalog/tombstone-styles?selected=N
///
/// The eight styles in picker order with the current choice marked.
pub async fn list_tombstone_styles(
    Query(params): Query<StylePickerParams>,
) -> Json<DataResponse<Vec<StyleOption>>> {
    let selected = params.selected.unwrap_or(DEFAULT_STYLE.number());
    Json(DataResponse {
        data: style_picker(selected),
    })
}
