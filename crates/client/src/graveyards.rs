//! The signed-in user's graveyard collection.

use std::sync::Arc;

use gravekeeper_core::error::CoreError;
use gravekeeper_core::graveyard::{can_delete_graveyard, pick_active, validate_graveyard_name};
use gravekeeper_core::theme::validate_theme_id;
use gravekeeper_core::types::DbId;

use crate::backend::MemorialBackend;
use crate::error::ClientError;
use crate::models::{Graveyard, GraveyardUpdate, NewGraveyard};

pub struct GraveyardStore<B> {
    backend: Arc<B>,
    /// Newest first.
    graveyards: Vec<Graveyard>,
    active_id: Option<DbId>,
}

impl<B: MemorialBackend> GraveyardStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            graveyards: Vec::new(),
            active_id: None,
        }
    }

    pub fn graveyards(&self) -> &[Graveyard] {
        &self.graveyards
    }

    /// The graveyard shown by default.
    pub fn active(&self) -> Option<&Graveyard> {
        let id = self.active_id?;
        self.graveyards.iter().find(|g| g.id == id)
    }

    pub fn get(&self, id: DbId) -> Option<&Graveyard> {
        self.graveyards.iter().find(|g| g.id == id)
    }

    /// Load the collection. The flagged graveyard becomes active, or the
    /// newest one when none is flagged.
    pub async fn fetch(&mut self) -> Result<(), ClientError> {
        let graveyards = self.backend.list_graveyards().await?;
        self.active_id = pick_active(&graveyards, |g| g.is_active).map(|i| graveyards[i].id);
        self.graveyards = graveyards;
        Ok(())
    }

    pub async fn create(&mut self, name: &str, theme: &str) -> Result<Graveyard, ClientError> {
        let name = name.trim();
        validate_graveyard_name(name)?;
        validate_theme_id(theme)?;

        let input = NewGraveyard {
            name: name.to_string(),
            theme: theme.to_string(),
        };
        let graveyard = self.backend.create_graveyard(&input).await?;
        self.graveyards.insert(0, graveyard.clone());
        if self.active_id.is_none() {
            self.active_id = Some(graveyard.id);
        }
        Ok(graveyard)
    }

    /// Make `id` the only active graveyard. Siblings are cleared locally once
    /// the backend confirms; no refetch is needed. Ids missing from the loaded
    /// collection are refused without a backend call.
    pub async fn set_active(&mut self, id: DbId) -> Result<(), ClientError> {
        if self.get(id).is_none() {
            return Err(CoreError::NotFound {
                entity: "Graveyard",
                id,
            }
            .into());
        }
        self.backend.activate_graveyard(id).await?;
        for graveyard in &mut self.graveyards {
            graveyard.is_active = graveyard.id == id;
        }
        self.active_id = Some(id);
        tracing::debug!(graveyard_id = id, "Active graveyard changed");
        Ok(())
    }

    pub async fn update(
        &mut self,
        id: DbId,
        update: GraveyardUpdate,
    ) -> Result<Graveyard, ClientError> {
        let update = GraveyardUpdate {
            name: update.name.map(|n| n.trim().to_string()),
            theme: update.theme,
        };
        if let Some(name) = &update.name {
            validate_graveyard_name(name)?;
        }
        if let Some(theme) = &update.theme {
            validate_theme_id(theme)?;
        }

        let updated = self.backend.update_graveyard(id, &update).await?;
        if let Some(slot) = self.graveyards.iter_mut().find(|g| g.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a graveyard and its memorials.
    ///
    /// The last remaining graveyard is refused here, before the backend is
    /// contacted. Deleting the active one hands the role to the first
    /// remaining graveyard.
    pub async fn delete(&mut self, id: DbId) -> Result<(), ClientError> {
        if !can_delete_graveyard(self.graveyards.len()) {
            return Err(ClientError::LastGraveyard);
        }

        self.backend.delete_graveyard(id).await?;
        self.graveyards.retain(|g| g.id != id);
        if self.active_id == Some(id) {
            self.active_id = self.graveyards.first_mut().map(|g| {
                g.is_active = true;
                g.id
            });
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.graveyards.clear();
        self.active_id = None;
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::fake::FakeBackend;

    async fn store_with(names: &[&str]) -> (Arc<FakeBackend>, GraveyardStore<FakeBackend>) {
        let backend = Arc::new(FakeBackend::signed_in("g@x.com"));
        let mut store = GraveyardStore::new(backend.clone());
        store.fetch().await.unwrap();
        for name in names {
            store.create(name, "final-meadow").await.unwrap();
        }
        (backend, store)
    }

    fn active_ids(store: &GraveyardStore<FakeBackend>) -> Vec<DbId> {
        store.graveyards().iter().filter(|g| g.is_active).map(|g| g.id).collect()
    }

    #[tokio::test]
    async fn fetch_picks_flagged_graveyard() {
        let (_, store) = store_with(&[]).await;
        assert_eq!(store.graveyards().len(), 1);
        let active = store.active().unwrap();
        assert!(active.is_active);
        assert_eq!(active.theme, "stillwater");
    }

    #[tokio::test]
    async fn fetch_falls_back_to_newest_when_none_flagged() {
        let (backend, mut store) = store_with(&["Second"]).await;
        backend.clear_active_flags();
        store.fetch().await.unwrap();
        assert_eq!(store.active().unwrap().name, "Second");
    }

    #[tokio::test]
    async fn create_prepends_inactive() {
        let (_, store) = store_with(&["Second", "Third"]).await;
        let names: Vec<&str> = store.graveyards().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Second", "Stillwater Grounds"]);
        assert_eq!(store.active().unwrap().name, "Stillwater Grounds");
    }

    #[tokio::test]
    async fn create_validates_locally() {
        let (backend, mut store) = store_with(&[]).await;
        let calls = backend.calls();

        let long = "x".repeat(51);
        assert_matches!(store.create(&long, "stillwater").await, Err(ClientError::Validation(_)));
        assert_matches!(store.create("  ", "stillwater").await, Err(ClientError::Validation(_)));
        assert_matches!(store.create("Ok", "moonbase").await, Err(ClientError::Validation(_)));
        assert_eq!(backend.calls(), calls);
    }

    #[tokio::test]
    async fn set_active_leaves_exactly_one() {
        let (_, mut store) = store_with(&["B", "C"]).await;
        let ids: Vec<DbId> = store.graveyards().iter().map(|g| g.id).collect();

        for id in [ids[1], ids[0], ids[0], ids[2]] {
            store.set_active(id).await.unwrap();
            assert_eq!(active_ids(&store), vec![id]);
            assert_eq!(store.active().unwrap().id, id);
        }
    }

    #[tokio::test]
    async fn failed_activation_leaves_state_alone() {
        let (backend, mut store) = store_with(&["B"]).await;
        let before = store.graveyards().to_vec();
        let target = before[0].id;

        backend.fail_next(500);
        assert_matches!(store.set_active(target).await, Err(ClientError::DataAccess(_)));
        assert_eq!(store.graveyards(), &before[..]);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let (_, mut store) = store_with(&["B"]).await;
        let id = store.graveyards()[0].id;
        let update = GraveyardUpdate {
            name: Some(" Renamed ".into()),
            ..Default::default()
        };
        store.update(id, update).await.unwrap();
        assert_eq!(store.get(id).unwrap().name, "Renamed");
        assert_eq!(store.get(id).unwrap().theme, "final-meadow");
    }

    #[tokio::test]
    async fn last_graveyard_is_refused_without_backend_call() {
        let (backend, mut store) = store_with(&[]).await;
        let only = store.graveyards()[0].id;
        let calls = backend.calls();

        assert_matches!(store.delete(only).await, Err(ClientError::LastGraveyard));
        assert_eq!(backend.calls(), calls);
        assert_eq!(store.graveyards().len(), 1);
    }

    #[tokio::test]
    async fn deleting_active_promotes_first_remaining() {
        let (_, mut store) = store_with(&["B", "C"]).await;
        let active = store.active().unwrap().id;

        store.delete(active).await.unwrap();
        assert_eq!(store.graveyards().len(), 2);
        assert_eq!(store.active().unwrap().id, store.graveyards()[0].id);
        assert_eq!(store.active().unwrap().name, "C");
        assert_eq!(active_ids(&store), vec![store.active().unwrap().id]);
    }

    #[tokio::test]
    async fn set_active_refuses_unknown_id() {
        let (backend, mut store) = store_with(&["B"]).await;
        let before = store.graveyards().to_vec();
        let active = store.active().unwrap().id;
        let calls = backend.calls();

        assert_matches!(
            store.set_active(9_999).await,
            Err(ClientError::Validation(CoreError::NotFound { .. }))
        );
        assert_eq!(backend.calls(), calls);
        assert_eq!(store.graveyards(), &before[..]);
        assert_eq!(store.active().unwrap().id, active);
    }

    #[tokio::test]
    async fn deleting_inactive_keeps_active() {
        let (_, mut store) = store_with(&["B"]).await;
        let active = store.active().unwrap().id;
        let other = store.graveyards()[0].id;

        store.delete(other).await.unwrap();
        assert_eq!(store.active().unwrap().id, active);
    }
}
