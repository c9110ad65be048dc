//! The signed-in user's memorials across all graveyards.

use std::sync::Arc;

use gravekeeper_core::memorial::{
    normalize_optional_text, random_position, validate_memorial, validate_new_memorial,
    MemorialFields,
};
use gravekeeper_core::types::DbId;

use crate::backend::MemorialBackend;
use crate::error::ClientError;
use crate::models::{Deceased, DeceasedUpdate, NewDeceased};

pub struct DeceasedStore<B> {
    backend: Arc<B>,
    /// Newest first.
    records: Vec<Deceased>,
}

impl<B: MemorialBackend> DeceasedStore<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Deceased] {
        &self.records
    }

    pub fn get(&self, id: DbId) -> Option<&Deceased> {
        self.records.iter().find(|d| d.id == id)
    }

    /// Memorials of one graveyard, newest first.
    pub fn for_graveyard(&self, graveyard_id: DbId) -> Vec<&Deceased> {
        self.records
            .iter()
            .filter(|d| d.graveyard_id == graveyard_id)
            .collect()
    }

    pub async fn fetch(&mut self) -> Result<(), ClientError> {
        self.records = self.backend.list_deceased(None).await?;
        Ok(())
    }

    /// Create a memorial. Unspecified coordinates are chosen at random.
    pub async fn add(&mut self, mut record: NewDeceased) -> Result<Deceased, ClientError> {
        record.notes = normalize_optional_text(record.notes);
        validate_new_memorial(&MemorialFields {
            name: Some(&record.name),
            epitaph: Some(&record.epitaph),
            notes: record.notes.as_deref(),
            tombstone_style: Some(record.tombstone_style),
            position_x: record.position_x,
            position_y: record.position_y,
        })?;

        let (x, y) = random_position();
        record.position_x.get_or_insert(x);
        record.position_y.get_or_insert(y);

        let created = self.backend.create_deceased(&record).await?;
        self.records.insert(0, created.clone());
        Ok(created)
    }

    pub async fn update(
        &mut self,
        id: DbId,
        mut update: DeceasedUpdate,
    ) -> Result<Deceased, ClientError> {
        update.notes = update.notes.map(normalize_optional_text);
        validate_memorial(&MemorialFields {
            name: update.name.as_deref(),
            epitaph: update.epitaph.as_deref(),
            notes: update.notes.as_ref().and_then(|n| n.as_deref()),
            tombstone_style: update.tombstone_style,
            position_x: update.position_x,
            position_y: update.position_y,
        })?;

        let updated = self.backend.update_deceased(id, &update).await?;
        if let Some(slot) = self.records.iter_mut().find(|d| d.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Remove exactly this memorial once the backend confirms.
    pub async fn delete(&mut self, id: DbId) -> Result<(), ClientError> {
        self.backend.delete_deceased(id).await?;
        self.records.retain(|d| d.id != id);
        Ok(())
    }

    /// Drop memorials of a graveyard the backend has already deleted.
    pub(crate) fn forget_graveyard(&mut self, graveyard_id: DbId) {
        self.records.retain(|d| d.graveyard_id != graveyard_id);
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
