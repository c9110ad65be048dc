//! Memorial (deceased) model and DTOs.

use gravekeeper_core::memorial::MemorialFields;
use gravekeeper_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deceased {
    pub id: DbId,
    pub user_id: DbId,
    pub graveyard_id: DbId,
    pub name: String,
    pub birth_date: Option<CalendarDate>,
    pub death_date: Option<CalendarDate>,
    pub epitaph: String,
    pub notes: Option<String>,
    pub tombstone_style: i32,
    pub position_x: i32,
    pub position_y: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a memorial. The owner comes from the session, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeceased {
    pub graveyard_id: DbId,
    pub name: String,
    pub birth_date: Option<CalendarDate>,
    pub death_date: Option<CalendarDate>,
    pub epitaph: String,
    pub notes: Option<String>,
    #[serde(default = "default_style")]
    pub tombstone_style: i32,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
}

fn default_style() -> i32 {
    gravekeeper_core::tombstone::DEFAULT_STYLE.number()
}

/// Partial memorial update. `None` leaves a field untouched.
///
/// The nullable columns are tri-state: absent leaves the value, an explicit
/// JSON `null` clears it.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateDeceased {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_nullable")]
    pub birth_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "super::deserialize_nullable")]
    pub death_date: Option<Option<CalendarDate>>,
    pub epitaph: Option<String>,
    #[serde(default, deserialize_with = "super::deserialize_nullable")]
    pub notes: Option<Option<String>>,
    pub tombstone_style: Option<i32>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
}

impl CreateDeceased {
    pub fn fields(&self) -> MemorialFields<'_> {
        MemorialFields {
            name: Some(&self.name),
            epitaph: Some(&self.epitaph),
            notes: self.notes.as_deref(),
            tombstone_style: Some(self.tombstone_style),
            position_x: self.position_x,
            position_y: self.position_y,
        }
    }
}

impl UpdateDeceased {
    pub fn fields(&self) -> MemorialFields<'_> {
        MemorialFields {
            name: self.name.as_deref(),
            epitaph: self.epitaph.as_deref(),
            notes: self.notes.as_ref().and_then(|n| n.as_deref()),
            tombstone_style: self.tombstone_style,
            position_x: self.position_x,
            position_y: self.position_y,
        }
    }
}
