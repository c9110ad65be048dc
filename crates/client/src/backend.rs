//! The seam between the stores and whatever serves the data.

use async_trait::async_trait;
use gravekeeper_core::types::DbId;

use crate::error::BackendError;
use crate::models::{
    CurrentUser, Deceased, DeceasedUpdate, DeletionReport, Graveyard, GraveyardUpdate, Identity,
    NewDeceased, NewGraveyard, Profile, ProfileUpdate,
};

/// Identity, profile, graveyard and memorial calls, scoped to the session
/// the backend currently holds.
#[async_trait]
pub trait MemorialBackend: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        graveyard_name: Option<&str>,
    ) -> Result<Identity, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, BackendError>;

    /// Revoke the session remotely and forget it locally.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// The current user, or `None` when no session is held.
    async fn current_user(&self) -> Result<Option<CurrentUser>, BackendError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, BackendError>;

    /// Newest first.
    async fn list_graveyards(&self) -> Result<Vec<Graveyard>, BackendError>;

    async fn create_graveyard(&self, input: &NewGraveyard) -> Result<Graveyard, BackendError>;

    async fn update_graveyard(
        &self,
        id: DbId,
        update: &GraveyardUpdate,
    ) -> Result<Graveyard, BackendError>;

    /// Make `id` the only active graveyard.
    async fn activate_graveyard(&self, id: DbId) -> Result<Graveyard, BackendError>;

    async fn delete_graveyard(&self, id: DbId) -> Result<(), BackendError>;

    /// Newest first, optionally limited to one graveyard.
    async fn list_deceased(&self, graveyard_id: Option<DbId>)
        -> Result<Vec<Deceased>, BackendError>;

    async fn create_deceased(&self, input: &NewDeceased) -> Result<Deceased, BackendError>;

    async fn update_deceased(
        &self,
        id: DbId,
        update: &DeceasedUpdate,
    ) -> Result<Deceased, BackendError>;

    async fn delete_deceased(&self, id: DbId) -> Result<(), BackendError>;

    /// Permanently delete the signed-in account.
    async fn delete_account(&self, confirmation: &str) -> Result<DeletionReport, BackendError>;
}
