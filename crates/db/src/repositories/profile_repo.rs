//! Repository for the `profiles` table.

use gravekeeper_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

pub(crate) const COLUMNS: &str = "id, email, graveyard_name, graveyard_theme, created_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(pool: &PgPool, user_id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update, creating the profile first if it is missing.
    ///
    /// Only non-`None` fields in `input` are applied.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        email: &str,
        input: &UpdateProfile,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (id, email, graveyard_name, graveyard_theme)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                graveyard_name = COALESCE(EXCLUDED.graveyard_name, profiles.graveyard_name),
                graveyard_theme = COALESCE(EXCLUDED.graveyard_theme, profiles.graveyard_theme)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(email)
            .bind(&input.graveyard_name)
            .bind(&input.graveyard_theme)
            .fetch_one(pool)
            .await
    }
}
