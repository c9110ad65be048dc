//! Bearer-token extractor for signed-in users.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gravekeeper_core::error::CoreError;
use gravekeeper_core::types::DbId;
use gravekeeper_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user behind a request.
///
/// Resolved against `users` on every request, so a token outliving its
/// account (deleted while the token was still valid) is rejected with 401.
/// Owned-data queries are scoped by `user_id`, never by a request body.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.sub, "Token for deleted account");
                unauthorized("User no longer exists")
            })?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }
}
