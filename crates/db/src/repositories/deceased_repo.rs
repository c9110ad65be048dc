//! Repository for the `deceased` table.

use gravekeeper_core::types::DbId;
use sqlx::PgPool;

use crate::models::deceased::{CreateDeceased, Deceased, UpdateDeceased};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, graveyard_id, name, birth_date, death_date, epitaph, notes, \
                       tombstone_style, position_x, position_y, created_at, updated_at";

/// Provides CRUD operations for memorial records.
pub struct DeceasedRepo;

impl DeceasedRepo {
    /// List a user's memorials, newest first, optionally narrowed to one graveyard.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        graveyard_id: Option<DbId>,
    ) -> Result<Vec<Deceased>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deceased
             WHERE user_id = $1
               AND ($2::BIGINT IS NULL OR graveyard_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Deceased>(&query)
            .bind(user_id)
            .bind(graveyard_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Deceased>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deceased WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Deceased>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a memorial at `position`.
    ///
    /// The composite foreign key rejects a graveyard the user does not own.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateDeceased,
        position: (i32, i32),
    ) -> Result<Deceased, sqlx::Error> {
        let query = format!(
            "INSERT INTO deceased
                (user_id, graveyard_id, name, birth_date, death_date, epitaph, notes,
                 tombstone_style, position_x, position_y)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deceased>(&query)
            .bind(user_id)
            .bind(input.graveyard_id)
            .bind(&input.name)
            .bind(input.birth_date)
            .bind(input.death_date)
            .bind(&input.epitaph)
            .bind(&input.notes)
            .bind(input.tombstone_style)
            .bind(position.0)
            .bind(position.1)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update and stamp `updated_at`.
    ///
    /// Plain fields use COALESCE. The nullable date and notes columns take a
    /// "was it sent" flag so an explicit `null` clears them.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateDeceased,
    ) -> Result<Option<Deceased>, sqlx::Error> {
        let query = format!(
            "UPDATE deceased SET
                name = COALESCE($3, name),
                birth_date = CASE WHEN $4 THEN $5 ELSE birth_date END,
                death_date = CASE WHEN $6 THEN $7 ELSE death_date END,
                epitaph = COALESCE($8, epitaph),
                notes = CASE WHEN $9 THEN $10 ELSE notes END,
                tombstone_style = COALESCE($11, tombstone_style),
                position_x = COALESCE($12, position_x),
                position_y = COALESCE($13, position_y),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deceased>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.birth_date.is_some())
            .bind(input.birth_date.flatten())
            .bind(input.death_date.is_some())
            .bind(input.death_date.flatten())
            .bind(&input.epitaph)
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .bind(input.tombstone_style)
            .bind(input.position_x)
            .bind(input.position_y)
            .fetch_optional(pool)
            .await
    }

    /// Delete a memorial. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM deceased WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
