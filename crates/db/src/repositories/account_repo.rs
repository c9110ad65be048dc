//! Account lifecycle: registration and the full deletion cascade.

use gravekeeper_core::account::{AccountDeletionStep, DELETION_ORDER};
use gravekeeper_core::types::DbId;
use serde::Serialize;
use sqlx::PgPool;

use crate::models::profile::Profile;
use crate::models::user::{CreateUser, User};

use super::profile_repo::COLUMNS as PROFILE_COLUMNS;
use super::user_repo::COLUMNS as USER_COLUMNS;

/// A deletion step failed. Earlier steps stay applied; rerunning the
/// cascade resumes from where it stopped.
#[derive(Debug, thiserror::Error)]
#[error("{}", .step.failure_message())]
pub struct AccountDeletionError {
    pub step: AccountDeletionStep,
    #[source]
    pub source: sqlx::Error,
}

/// Rows removed by each step of a completed cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountDeletionReport {
    pub memorials: u64,
    pub graveyards: u64,
    pub profile: u64,
    pub sessions: u64,
    pub identity: u64,
}

impl AccountDeletionReport {
    fn record(&mut self, step: AccountDeletionStep, rows: u64) {
        match step {
            AccountDeletionStep::Memorials => self.memorials = rows,
            AccountDeletionStep::Graveyards => self.graveyards = rows,
            AccountDeletionStep::Profile => self.profile = rows,
            AccountDeletionStep::Sessions => self.sessions = rows,
            AccountDeletionStep::Identity => self.identity = rows,
        }
    }
}

fn delete_statement(step: AccountDeletionStep) -> &'static str {
    match step {
        AccountDeletionStep::Memorials => "DELETE FROM deceased WHERE user_id = $1",
        AccountDeletionStep::Graveyards => "DELETE FROM graveyards WHERE user_id = $1",
        AccountDeletionStep::Profile => "DELETE FROM profiles WHERE id = $1",
        AccountDeletionStep::Sessions => "DELETE FROM user_sessions WHERE user_id = $1",
        AccountDeletionStep::Identity => "DELETE FROM users WHERE id = $1",
    }
}

pub struct AccountRepo;

impl AccountRepo {
    /// Create an identity and its profile atomically, optionally seeding the
    /// profile's graveyard name.
    ///
    /// A duplicate email fails on `uq_users_email` and leaves nothing behind.
    pub async fn register(
        pool: &PgPool,
        input: &CreateUser,
        graveyard_name: Option<&str>,
    ) -> Result<(User, Profile), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO profiles (id, email, graveyard_name)
             VALUES ($1, $2, $3)
             RETURNING {PROFILE_COLUMNS}"
        );
        let profile = sqlx::query_as::<_, Profile>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(graveyard_name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((user, profile))
    }

    /// Remove everything the user owns, then the identity itself.
    ///
    /// Steps run one at a time in [`DELETION_ORDER`], outside a transaction,
    /// and stop at the first failure. Every step is a plain filtered delete,
    /// so a repeat run after a partial failure is safe.
    pub async fn delete_account(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<AccountDeletionReport, AccountDeletionError> {
        let mut report = AccountDeletionReport::default();

        for step in DELETION_ORDER {
            let result = sqlx::query(delete_statement(step))
                .bind(user_id)
                .execute(pool)
                .await
                .map_err(|source| {
                    tracing::error!(user_id, step = %step, error = %source, "Account deletion step failed");
                    AccountDeletionError { step, source }
                })?;

            tracing::debug!(user_id, step = %step, rows = result.rows_affected(), "Account deletion step done");
            report.record(step, result.rows_affected());
        }

        tracing::info!(user_id, ?report, "Account deleted");
        Ok(report)
    }
}
