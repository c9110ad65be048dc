//! Store lifecycle: created at app start, torn down at sign-out.

use std::sync::Arc;

use gravekeeper_core::confirmation::ConfirmationPrompt;
use gravekeeper_core::types::DbId;

use crate::backend::MemorialBackend;
use crate::deceased::DeceasedStore;
use crate::error::ClientError;
use crate::graveyards::GraveyardStore;
use crate::models::{Deceased, DeletionReport};
use crate::session::AuthSession;

/// The three stores sharing one backend.
pub struct MemorialApp<B> {
    pub auth: AuthSession<B>,
    pub graveyards: GraveyardStore<B>,
    pub deceased: DeceasedStore<B>,
}

impl<B: MemorialBackend> MemorialApp<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            auth: AuthSession::new(backend.clone()),
            graveyards: GraveyardStore::new(backend.clone()),
            deceased: DeceasedStore::new(backend),
        }
    }

    /// Restore the session and, when signed in, load all data.
    pub async fn start(&mut self) -> Result<(), ClientError> {
        self.auth.initialize().await?;
        if self.auth.user().is_some() {
            self.load().await?;
        }
        Ok(())
    }

    /// Fetch graveyards and memorials for the signed-in user.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.graveyards.fetch().await?;
        self.deceased.fetch().await?;
        Ok(())
    }

    pub async fn sign_out(&mut self) {
        self.auth.sign_out().await;
        self.teardown();
    }

    /// Memorials of the active graveyard, newest first.
    pub fn active_memorials(&self) -> Vec<&Deceased> {
        match self.graveyards.active() {
            Some(graveyard) => self.deceased.for_graveyard(graveyard.id),
            None => Vec::new(),
        }
    }

    /// Delete a graveyard and drop its memorials from the local cache.
    pub async fn delete_graveyard(&mut self, id: DbId) -> Result<(), ClientError> {
        self.graveyards.delete(id).await?;
        self.deceased.forget_graveyard(id);
        Ok(())
    }

    pub async fn delete_account(
        &mut self,
        prompt: &ConfirmationPrompt,
    ) -> Result<DeletionReport, ClientError> {
        let report = self.auth.delete_account(prompt).await?;
        self.teardown();
        Ok(report)
    }

    fn teardown(&mut self) {
        self.graveyards.clear();
        self.deceased.clear();
    }
}
