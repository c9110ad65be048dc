//! Graveyard model and DTOs.

use gravekeeper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Graveyard {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub theme: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a graveyard. New graveyards start inactive.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGraveyard {
    pub name: String,
    pub theme: String,
}

/// Partial graveyard update. Activation goes through its own operation.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateGraveyard {
    pub name: Option<String>,
    pub theme: Option<String>,
}

/// Result of a guarded graveyard delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraveyardDeletion {
    Deleted,
    NotFound,
    /// The graveyard is the owner's only one and was kept.
    LastRemaining,
}
