//! Profile model: one row per identity.

use gravekeeper_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    /// Equal to the owning identity's id.
    pub id: DbId,
    pub email: String,
    pub graveyard_name: Option<String>,
    pub graveyard_theme: Option<String>,
    pub created_at: Timestamp,
}

/// Partial profile update. `None` leaves a field untouched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateProfile {
    pub graveyard_name: Option<String>,
    pub graveyard_theme: Option<String>,
}
