//! Wire shapes exchanged with the Gravekeeper API.
//!
//! These mirror the server's JSON; the client never links the database crate.

use gravekeeper_core::tombstone::{render_tombstone, TombstoneView};
use gravekeeper_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// The signed-in identity (id + email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: DbId,
    pub email: String,
}

/// Tokens issued by the identity endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: DbId,
    pub email: String,
    pub graveyard_name: Option<String>,
    pub graveyard_theme: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub user: Identity,
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graveyard_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graveyard_theme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graveyard {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub theme: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGraveyard {
    pub name: String,
    pub theme: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GraveyardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// One memorial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

impl Deceased {
    /// What this memorial's stone shows in the scene.
    pub fn tombstone(&self) -> TombstoneView {
        render_tombstone(
            self.tombstone_style,
            &self.name,
            self.birth_date,
            self.death_date,
            &self.epitaph,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDeceased {
    pub graveyard_id: DbId,
    pub name: String,
    pub birth_date: Option<CalendarDate>,
    pub death_date: Option<CalendarDate>,
    pub epitaph: String,
    pub notes: Option<String>,
    pub tombstone_style: i32,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
}

impl NewDeceased {
    /// A memorial with no dates or notes, in the default style.
    pub fn new(graveyard_id: DbId, name: impl Into<String>, epitaph: impl Into<String>) -> Self {
        Self {
            graveyard_id,
            name: name.into(),
            birth_date: None,
            death_date: None,
            epitaph: epitaph.into(),
            notes: None,
            tombstone_style: gravekeeper_core::tombstone::DEFAULT_STYLE.number(),
            position_x: None,
            position_y: None,
        }
    }
}

/// Partial memorial update.
///
/// For the nullable fields, `None` leaves the value alone and `Some(None)`
/// sends an explicit `null` to clear it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeceasedUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Option<CalendarDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<Option<CalendarDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epitaph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tombstone_style: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<i32>,
}

/// Rows removed by each account deletion step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeletionReport {
    pub memorials: u64,
    pub graveyards: u64,
    pub profile: u64,
    pub sessions: u64,
    pub identity: u64,
}

/// `{ "data": ... }` envelope used by resource endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}
