//! Repository for the `graveyards` table.
//!
//! At most one graveyard per user is active. The partial unique index
//! `uq_graveyards_one_active_per_user` enforces it; [`GraveyardRepo::set_active`]
//! moves the flag inside one transaction so the index never trips.

use gravekeeper_core::graveyard::can_delete_graveyard;
use gravekeeper_core::types::DbId;
use sqlx::PgPool;

use crate::models::graveyard::{CreateGraveyard, Graveyard, GraveyardDeletion, UpdateGraveyard};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, user_id, name, theme, is_active, created_at, updated_at";

/// Provides CRUD operations for graveyards.
pub struct GraveyardRepo;

impl GraveyardRepo {
    /// List a user's graveyards, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Graveyard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM graveyards
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Graveyard>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a graveyard owned by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Graveyard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM graveyards WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Graveyard>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM graveyards WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new, inactive graveyard.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateGraveyard,
    ) -> Result<Graveyard, sqlx::Error> {
        let query = format!(
            "INSERT INTO graveyards (user_id, name, theme, is_active)
             VALUES ($1, $2, $3, false)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Graveyard>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.theme)
            .fetch_one(pool)
            .await
    }

    /// Create the user's first graveyard, already active.
    ///
    /// Returns `None` when the user already has a graveyard, including when a
    /// concurrent request created it first.
    pub async fn create_default(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        theme: &str,
    ) -> Result<Option<Graveyard>, sqlx::Error> {
        let query = format!(
            "INSERT INTO graveyards (user_id, name, theme, is_active)
             SELECT $1, $2, $3, true
             WHERE NOT EXISTS (SELECT 1 FROM graveyards WHERE user_id = $1)
             ON CONFLICT (user_id) WHERE is_active DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Graveyard>(&query)
            .bind(user_id)
            .bind(name)
            .bind(theme)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateGraveyard,
    ) -> Result<Option<Graveyard>, sqlx::Error> {
        let query = format!(
            "UPDATE graveyards SET
                name = COALESCE($3, name),
                theme = COALESCE($4, theme),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Graveyard>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.theme)
            .fetch_optional(pool)
            .await
    }

    /// Make `id` the user's only active graveyard.
    ///
    /// Clears every sibling and sets the target in one transaction. Returns
    /// `None` (and changes nothing) when the graveyard is not the user's.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Graveyard>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE graveyards SET is_active = false, updated_at = NOW()
             WHERE user_id = $1 AND is_active AND id <> $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE graveyards SET is_active = true, updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        let activated = sqlx::query_as::<_, Graveyard>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        match activated {
            Some(graveyard) => {
                tx.commit().await?;
                Ok(Some(graveyard))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete a graveyard unless it is the owner's last one.
    ///
    /// The owner's rows are locked while counting so two concurrent deletes
    /// cannot both pass the guard.
    pub async fn delete_unless_last(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<GraveyardDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owned: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM graveyards WHERE user_id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_all(&mut *tx)
                .await?;

        if !owned.contains(&id) {
            return Ok(GraveyardDeletion::NotFound);
        }
        if !can_delete_graveyard(owned.len()) {
            return Ok(GraveyardDeletion::LastRemaining);
        }

        sqlx::query("DELETE FROM graveyards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(GraveyardDeletion::Deleted)
    }
}
