//! In-memory [`MemorialBackend`] for store tests.
//!
//! Mirrors the server rules the stores rely on: newest-first ordering, one
//! active graveyard, lazy default graveyard, last-graveyard refusal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use gravekeeper_core::account::AccountDeletionStep;
use gravekeeper_core::theme::{graveyard_title, Theme};
use gravekeeper_core::types::DbId;

use crate::backend::MemorialBackend;
use crate::error::BackendError;
use crate::models::{
    CurrentUser, Deceased, DeceasedUpdate, DeletionReport, Graveyard, GraveyardUpdate, Identity,
    NewDeceased, NewGraveyard, Profile, ProfileUpdate,
};

#[derive(Default)]
struct FakeState {
    users: Vec<(Identity, String)>,
    profiles: Vec<Profile>,
    graveyards: Vec<Graveyard>,
    deceased: Vec<Deceased>,
    session: Option<DbId>,
    next_id: DbId,
    fail_status: Option<u16>,
    fail_step: Option<AccountDeletionStep>,
}

impl FakeState {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn user_id(&self) -> Result<DbId, BackendError> {
        self.session.ok_or(BackendError::NoSession)
    }

    fn provision_default(&mut self, user_id: DbId) {
        if self.graveyards.iter().any(|g| g.user_id == user_id) {
            return;
        }
        let profile = self.profiles.iter().find(|p| p.id == user_id);
        let theme = Theme::resolve(profile.and_then(|p| p.graveyard_theme.as_deref()));
        let name = graveyard_title(
            profile.and_then(|p| p.graveyard_name.as_deref()),
            Some(theme.id()),
        );
        let id = self.next_id();
        let now = Utc::now();
        self.graveyards.push(Graveyard {
            id,
            user_id,
            name,
            theme: theme.id().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        });
    }

    fn owned_graveyard(&mut self, id: DbId) -> Result<&mut Graveyard, BackendError> {
        let user_id = self.user_id()?;
        self.graveyards
            .iter_mut()
            .find(|g| g.id == id && g.user_id == user_id)
            .ok_or_else(|| api_error(404, "Graveyard not found"))
    }
}

fn api_error(status: u16, message: &str) -> BackendError {
    BackendError::Api {
        status,
        code: "FAKE".to_string(),
        message: message.to_string(),
        step: None,
    }
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
    calls: AtomicUsize,
}

impl FakeBackend {
    /// A backend with one registered, signed-in user.
    pub fn signed_in(email: &str) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            let id = state.next_id();
            state.users.push((
                Identity {
                    id,
                    email: email.to_string(),
                },
                "secret1".to_string(),
            ));
            state.profiles.push(Profile {
                id,
                email: email.to_string(),
                graveyard_name: None,
                graveyard_theme: None,
                created_at: Utc::now(),
            });
            state.session = Some(id);
        }
        backend
    }

    /// Number of backend calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make the next call fail with `status`.
    pub fn fail_next(&self, status: u16) {
        self.state.lock().unwrap().fail_status = Some(status);
    }

    pub fn fail_deletion_at(&self, step: AccountDeletionStep) {
        self.state.lock().unwrap().fail_step = Some(step);
    }

    pub fn clear_active_flags(&self) {
        for graveyard in &mut self.state.lock().unwrap().graveyards {
            graveyard.is_active = false;
        }
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, FakeState>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        match state.fail_status.take() {
            Some(status) => Err(api_error(status, "injected failure")),
            None => Ok(state),
        }
    }
}

fn newest_first<T: Clone>(items: impl Iterator<Item = T>, id: impl Fn(&T) -> DbId) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(|item| std::cmp::Reverse(id(item)));
    items
}

#[async_trait]
impl MemorialBackend for FakeBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        graveyard_name: Option<&str>,
    ) -> Result<Identity, BackendError> {
        let mut state = self.enter()?;
        if state.users.iter().any(|(u, _)| u.email == email) {
            return Err(api_error(409, "An account with this email already exists"));
        }
        let id = state.next_id();
        let identity = Identity {
            id,
            email: email.to_string(),
        };
        state.users.push((identity.clone(), password.to_string()));
        state.profiles.push(Profile {
            id,
            email: email.to_string(),
            graveyard_name: graveyard_name.map(str::to_string),
            graveyard_theme: None,
            created_at: Utc::now(),
        });
        state.session = Some(id);
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, BackendError> {
        let mut state = self.enter()?;
        let identity = state
            .users
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api_error(401, "Invalid email or password"))?;
        state.session = Some(identity.id);
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.enter()?.session = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<CurrentUser>, BackendError> {
        let state = self.enter()?;
        let Some(user_id) = state.session else {
            return Ok(None);
        };
        let user = state
            .users
            .iter()
            .find(|(u, _)| u.id == user_id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| api_error(401, "Unknown user"))?;
        let profile = state.profiles.iter().find(|p| p.id == user_id).cloned();
        Ok(Some(CurrentUser { user, profile }))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        let profile = state
            .profiles
            .iter_mut()
            .find(|p| p.id == user_id)
            .ok_or_else(|| api_error(404, "Profile not found"))?;
        if let Some(name) = &update.graveyard_name {
            profile.graveyard_name = Some(name.clone());
        }
        if let Some(theme) = &update.graveyard_theme {
            profile.graveyard_theme = Some(theme.clone());
        }
        let profile = profile.clone();
        state.provision_default(user_id);
        Ok(profile)
    }

    async fn list_graveyards(&self) -> Result<Vec<Graveyard>, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        state.provision_default(user_id);
        Ok(newest_first(
            state.graveyards.iter().filter(|g| g.user_id == user_id).cloned(),
            |g| g.id,
        ))
    }

    async fn create_graveyard(&self, input: &NewGraveyard) -> Result<Graveyard, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        let id = state.next_id();
        let now = Utc::now();
        let graveyard = Graveyard {
            id,
            user_id,
            name: input.name.clone(),
            theme: input.theme.clone(),
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        state.graveyards.push(graveyard.clone());
        Ok(graveyard)
    }

    async fn update_graveyard(
        &self,
        id: DbId,
        update: &GraveyardUpdate,
    ) -> Result<Graveyard, BackendError> {
        let mut state = self.enter()?;
        let graveyard = state.owned_graveyard(id)?;
        if let Some(name) = &update.name {
            graveyard.name = name.clone();
        }
        if let Some(theme) = &update.theme {
            graveyard.theme = theme.clone();
        }
        graveyard.updated_at = Utc::now();
        Ok(graveyard.clone())
    }

    async fn activate_graveyard(&self, id: DbId) -> Result<Graveyard, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        state.owned_graveyard(id)?;
        for graveyard in state.graveyards.iter_mut().filter(|g| g.user_id == user_id) {
            graveyard.is_active = graveyard.id == id;
        }
        Ok(state.owned_graveyard(id)?.clone())
    }

    async fn delete_graveyard(&self, id: DbId) -> Result<(), BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        state.owned_graveyard(id)?;
        if state.graveyards.iter().filter(|g| g.user_id == user_id).count() <= 1 {
            return Err(api_error(409, "You must have at least one graveyard"));
        }
        state.graveyards.retain(|g| g.id != id);
        state.deceased.retain(|d| d.graveyard_id != id);
        Ok(())
    }

    async fn list_deceased(
        &self,
        graveyard_id: Option<DbId>,
    ) -> Result<Vec<Deceased>, BackendError> {
        let state = self.enter()?;
        let user_id = state.user_id()?;
        Ok(newest_first(
            state
                .deceased
                .iter()
                .filter(|d| d.user_id == user_id)
                .filter(|d| graveyard_id.map_or(true, |g| d.graveyard_id == g))
                .cloned(),
            |d| d.id,
        ))
    }

    async fn create_deceased(&self, input: &NewDeceased) -> Result<Deceased, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        state.owned_graveyard(input.graveyard_id)?;
        let id = state.next_id();
        let now = Utc::now();
        let record = Deceased {
            id,
            user_id,
            graveyard_id: input.graveyard_id,
            name: input.name.clone(),
            birth_date: input.birth_date,
            death_date: input.death_date,
            epitaph: input.epitaph.clone(),
            notes: input.notes.clone(),
            tombstone_style: input.tombstone_style,
            position_x: input.position_x.unwrap_or_default(),
            position_y: input.position_y.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        state.deceased.push(record.clone());
        Ok(record)
    }

    async fn update_deceased(
        &self,
        id: DbId,
        update: &DeceasedUpdate,
    ) -> Result<Deceased, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        let record = state
            .deceased
            .iter_mut()
            .find(|d| d.id == id && d.user_id == user_id)
            .ok_or_else(|| api_error(404, "Deceased not found"))?;
        if let Some(name) = &update.name {
            record.name = name.clone();
        }
        if let Some(birth_date) = update.birth_date {
            record.birth_date = birth_date;
        }
        if let Some(death_date) = update.death_date {
            record.death_date = death_date;
        }
        if let Some(epitaph) = &update.epitaph {
            record.epitaph = epitaph.clone();
        }
        if let Some(notes) = &update.notes {
            record.notes = notes.clone();
        }
        if let Some(style) = update.tombstone_style {
            record.tombstone_style = style;
        }
        if let Some(x) = update.position_x {
            record.position_x = x;
        }
        if let Some(y) = update.position_y {
            record.position_y = y;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_deceased(&self, id: DbId) -> Result<(), BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        let before = state.deceased.len();
        state.deceased.retain(|d| !(d.id == id && d.user_id == user_id));
        if state.deceased.len() == before {
            return Err(api_error(404, "Deceased not found"));
        }
        Ok(())
    }

    async fn delete_account(&self, confirmation: &str) -> Result<DeletionReport, BackendError> {
        let mut state = self.enter()?;
        let user_id = state.user_id()?;
        if confirmation != "DELETE" {
            return Err(api_error(400, "Type DELETE to confirm account deletion"));
        }
        if let Some(step) = state.fail_step.take() {
            return Err(BackendError::Api {
                status: 500,
                code: "ACCOUNT_DELETION_FAILED".to_string(),
                message: step.failure_message().to_string(),
                step: Some(step),
            });
        }

        let count = |before: usize, after: usize| (before - after) as u64;
        let mut report = DeletionReport::default();

        let before = state.deceased.len();
        state.deceased.retain(|d| d.user_id != user_id);
        report.memorials = count(before, state.deceased.len());

        let before = state.graveyards.len();
        state.graveyards.retain(|g| g.user_id != user_id);
        report.graveyards = count(before, state.graveyards.len());

        let before = state.profiles.len();
        state.profiles.retain(|p| p.id != user_id);
        report.profile = count(before, state.profiles.len());

        report.sessions = 1;
        state.session = None;

        let before = state.users.len();
        state.users.retain(|(u, _)| u.id != user_id);
        report.identity = count(before, state.users.len());

        Ok(report)
    }
}
