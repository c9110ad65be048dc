//! The identity session: who is signed in and their profile.

use std::sync::Arc;

use gravekeeper_core::confirmation::{verify_account_deletion, ConfirmationPrompt};
use gravekeeper_core::graveyard::validate_graveyard_name;
use gravekeeper_core::memorial::normalize_optional_text;
use gravekeeper_core::theme::validate_theme_id;

use crate::backend::MemorialBackend;
use crate::error::{AuthError, ClientError};
use crate::models::{DeletionReport, Identity, Profile, ProfileUpdate};

pub struct AuthSession<B> {
    backend: Arc<B>,
    user: Option<Identity>,
    profile: Option<Profile>,
}

impl<B: MemorialBackend> AuthSession<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            user: None,
            profile: None,
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Register a new account and sign in. A supplied graveyard name seeds
    /// the profile.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        graveyard_name: Option<&str>,
    ) -> Result<Identity, ClientError> {
        let graveyard_name = normalize_optional_text(graveyard_name.map(|n| n.trim().to_string()));
        if let Some(name) = &graveyard_name {
            validate_graveyard_name(name)?;
        }

        let identity = self
            .backend
            .sign_up(email, password, graveyard_name.as_deref())
            .await
            .map_err(AuthError::from_sign_up)?;
        tracing::info!(user_id = identity.id, "Signed up");

        self.initialize().await?;
        Ok(identity)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Identity, ClientError> {
        let identity = self
            .backend
            .sign_in(email, password)
            .await
            .map_err(AuthError::from_sign_in)?;
        tracing::info!(user_id = identity.id, "Signed in");

        self.initialize().await?;
        Ok(identity)
    }

    /// Drop the session. Remote revocation failures are logged, not returned.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.backend.sign_out().await {
            tracing::warn!(error = %e, "Remote sign-out failed");
        }
        self.clear();
    }

    /// Restore the current session and its profile.
    ///
    /// Safe to call repeatedly. Without a valid session the state is simply
    /// "no user".
    pub async fn initialize(&mut self) -> Result<(), ClientError> {
        match self.backend.current_user().await {
            Ok(Some(current)) => {
                self.user = Some(current.user);
                self.profile = current.profile;
                Ok(())
            }
            Ok(None) => {
                self.clear();
                Ok(())
            }
            Err(e) => match ClientError::from(e) {
                ClientError::NotAuthenticated => {
                    self.clear();
                    Ok(())
                }
                other => Err(other),
            },
        }
    }

    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<Profile, ClientError> {
        if self.user.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let update = ProfileUpdate {
            graveyard_name: normalize_optional_text(
                update.graveyard_name.map(|n| n.trim().to_string()),
            ),
            graveyard_theme: update.graveyard_theme,
        };
        if let Some(name) = &update.graveyard_name {
            validate_graveyard_name(name)?;
        }
        if let Some(theme) = &update.graveyard_theme {
            validate_theme_id(theme)?;
        }

        let profile = self.backend.update_profile(&update).await?;
        self.initialize().await?;
        Ok(profile)
    }

    /// Permanently delete the account. Rejected without a backend call
    /// unless the prompt holds the exact confirmation phrase.
    pub async fn delete_account(
        &mut self,
        prompt: &ConfirmationPrompt,
    ) -> Result<DeletionReport, ClientError> {
        let Some(user) = &self.user else {
            return Err(ClientError::NotAuthenticated);
        };
        verify_account_deletion(prompt.input())?;
        let user_id = user.id;

        let report = self.backend.delete_account(prompt.input()).await?;
        tracing::info!(user_id, "Account deleted");
        self.clear();
        Ok(report)
    }

    fn clear(&mut self) {
        self.user = None;
        self.profile = None;
    }
}
